//! Make-style dependency extraction for the paper build.
//!
//! Scans a LaTeX/pandoc source for included figures and bibliography
//! references and emits one `target: prerequisite` line per hit, suitable
//! for inclusion in a Makefile.

use std::io::BufRead;

use regex::Regex;

use crate::error::Result;

/// Scan `reader` for figure and bibliography references of `target`.
pub fn scan_dependencies(target: &str, reader: impl BufRead) -> Result<Vec<String>> {
    // Unwraps are fine: the patterns are fixed at compile time.
    let figure_re = Regex::new(r"(figures/\S*\.png)").unwrap();
    let bib_re = Regex::new(r"bibliography\{([^}]*)\}").unwrap();

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };

        if let Some(caps) = figure_re.captures(&line) {
            lines.push(format!("{target}: {}", &caps[1]));
        }

        if let Some(caps) = bib_re.captures(&line) {
            // \bibliography{} takes a comma-separated list, extensions
            // usually omitted.
            for name in caps[1].split(',') {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                let with_ext = if name.ends_with(".bib") {
                    name.to_string()
                } else {
                    format!("{name}.bib")
                };
                lines.push(format!("{target}: {with_ext}"));
            }
        }
    }
    Ok(lines)
}
