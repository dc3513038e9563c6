//! The 15 skeletal joints reported by the tracker, and their CSV column names.

use serde::{Deserialize, Serialize};

/// One of the 15 tracked skeleton joints.
///
/// The variant order matches the raw recording column order: each joint
/// occupies three consecutive columns (`joint<Name>X`, `joint<Name>Y`,
/// `joint<Name>Z`) after the user id and timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    Head,
    Neck,
    LeftShoulder,
    RightShoulder,
    Torso,
    LeftElbow,
    RightElbow,
    LeftHand,
    RightHand,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftFoot,
    RightFoot,
}

impl Joint {
    pub const COUNT: usize = 15;

    pub const ALL: [Joint; Joint::COUNT] = [
        Joint::Head,
        Joint::Neck,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::Torso,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftHand,
        Joint::RightHand,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftFoot,
        Joint::RightFoot,
    ];

    /// CSV column prefix, e.g. `jointHead`.
    pub fn name(&self) -> &'static str {
        match self {
            Joint::Head => "jointHead",
            Joint::Neck => "jointNeck",
            Joint::LeftShoulder => "jointLeftShoulder",
            Joint::RightShoulder => "jointRightShoulder",
            Joint::Torso => "jointTorso",
            Joint::LeftElbow => "jointLeftElbow",
            Joint::RightElbow => "jointRightElbow",
            Joint::LeftHand => "jointLeftHand",
            Joint::RightHand => "jointRightHand",
            Joint::LeftHip => "jointLeftHip",
            Joint::RightHip => "jointRightHip",
            Joint::LeftKnee => "jointLeftKnee",
            Joint::RightKnee => "jointRightKnee",
            Joint::LeftFoot => "jointLeftFoot",
            Joint::RightFoot => "jointRightFoot",
        }
    }

    pub fn column_x(&self) -> String {
        format!("{}X", self.name())
    }

    pub fn column_y(&self) -> String {
        format!("{}Y", self.name())
    }

    pub fn column_z(&self) -> String {
        format!("{}Z", self.name())
    }

    /// Column holding the derived per-sample movement, e.g.
    /// `jointHeadDisplacement`.
    pub fn displacement_column(&self) -> String {
        format!("{}Displacement", self.name())
    }
}

pub const USER_ID_COLUMN: &str = "userId";
pub const MILLIS_COLUMN: &str = "utcMillisecondsSinceEpoch";
pub const MICROS_COLUMN: &str = "utcMicrosecondsSinceEpoch";

/// Canonical header for headerless raw recordings: user id, epoch
/// timestamp, then x/y/z triplets for every joint in `Joint::ALL` order.
pub fn canonical_header() -> Vec<String> {
    let mut header = Vec::with_capacity(2 + 3 * Joint::COUNT);
    header.push(USER_ID_COLUMN.to_string());
    header.push(MILLIS_COLUMN.to_string());
    for joint in Joint::ALL {
        header.push(joint.column_x());
        header.push(joint.column_y());
        header.push(joint.column_z());
    }
    header
}
