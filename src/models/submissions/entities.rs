use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩等级（奥地利五级制，SEHR_GUT 最好）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum Grade {
    SehrGut,        // 1
    Gut,            // 2
    Befriedigend,   // 3
    Genuegend,      // 4
    NichtGenuegend, // 5
}

impl Grade {
    pub const SEHR_GUT: &'static str = "SEHR_GUT";
    pub const GUT: &'static str = "GUT";
    pub const BEFRIEDIGEND: &'static str = "BEFRIEDIGEND";
    pub const GENUEGEND: &'static str = "GENUEGEND";
    pub const NICHT_GENUEGEND: &'static str = "NICHT_GENUEGEND";

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::SehrGut => Self::SEHR_GUT,
            Grade::Gut => Self::GUT,
            Grade::Befriedigend => Self::BEFRIEDIGEND,
            Grade::Genuegend => Self::GENUEGEND,
            Grade::NichtGenuegend => Self::NICHT_GENUEGEND,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Grade::SEHR_GUT => Ok(Grade::SehrGut),
            Grade::GUT => Ok(Grade::Gut),
            Grade::BEFRIEDIGEND => Ok(Grade::Befriedigend),
            Grade::GENUEGEND => Ok(Grade::Genuegend),
            Grade::NICHT_GENUEGEND => Ok(Grade::NichtGenuegend),
            _ => Err(format!(
                "Invalid grade: {s}. Supported: SEHR_GUT, GUT, BEFRIEDIGEND, GENUEGEND, NICHT_GENUEGEND"
            )),
        }
    }
}

// 提交实体（包含文件内容）
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: i64,
    pub user_email: String,
    pub file_name: String,
    pub file_data: Vec<u8>,
    pub grading: Option<Grade>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_order() {
        assert!(Grade::SehrGut < Grade::Gut);
        assert!(Grade::Gut < Grade::Befriedigend);
        assert!(Grade::Befriedigend < Grade::Genuegend);
        assert!(Grade::Genuegend < Grade::NichtGenuegend);
    }

    #[test]
    fn test_grade_parse() {
        for grade in [
            Grade::SehrGut,
            Grade::Gut,
            Grade::Befriedigend,
            Grade::Genuegend,
            Grade::NichtGenuegend,
        ] {
            assert_eq!(grade.as_str().parse::<Grade>(), Ok(grade));
        }
        assert!("gut".parse::<Grade>().is_err());
        assert!("SEHR GUT".parse::<Grade>().is_err());
    }

    #[test]
    fn test_grade_serde_names() {
        assert_eq!(
            serde_json::to_string(&Grade::NichtGenuegend).unwrap(),
            "\"NICHT_GENUEGEND\""
        );
        let grade: Grade = serde_json::from_str("\"BEFRIEDIGEND\"").unwrap();
        assert_eq!(grade, Grade::Befriedigend);
    }
}
