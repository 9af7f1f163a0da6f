//! Downtime problem categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of downtime problem categories offered to operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    Mechanical,
    Electrical,
    Pneumatic,
    Hydraulic,
    Tooling,
    Material,
    Quality,
    Other,
}

impl ProblemType {
    pub const ALL: [ProblemType; 8] = [
        ProblemType::Mechanical,
        ProblemType::Electrical,
        ProblemType::Pneumatic,
        ProblemType::Hydraulic,
        ProblemType::Tooling,
        ProblemType::Material,
        ProblemType::Quality,
        ProblemType::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ProblemType::Mechanical => "mechanical",
            ProblemType::Electrical => "electrical",
            ProblemType::Pneumatic => "pneumatic",
            ProblemType::Hydraulic => "hydraulic",
            ProblemType::Tooling => "tooling",
            ProblemType::Material => "material",
            ProblemType::Quality => "quality",
            ProblemType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProblemType::Mechanical => "Mechanical",
            ProblemType::Electrical => "Electrical",
            ProblemType::Pneumatic => "Pneumatic",
            ProblemType::Hydraulic => "Hydraulic",
            ProblemType::Tooling => "Tooling / die",
            ProblemType::Material => "Material shortage",
            ProblemType::Quality => "Quality problem",
            ProblemType::Other => "Other",
        }
    }

    pub fn thai_label(&self) -> &'static str {
        match self {
            ProblemType::Mechanical => "ปัญหาทางกล",
            ProblemType::Electrical => "ปัญหาทางไฟฟ้า",
            ProblemType::Pneumatic => "ระบบลม",
            ProblemType::Hydraulic => "ระบบไฮดรอลิก",
            ProblemType::Tooling => "แม่พิมพ์/เครื่องมือ",
            ProblemType::Material => "วัตถุดิบขาด",
            ProblemType::Quality => "ปัญหาคุณภาพ",
            ProblemType::Other => "อื่นๆ",
        }
    }
}

impl FromStr for ProblemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.code() == wanted)
            .ok_or_else(|| format!("unknown problem type '{}'", s.trim()))
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}
