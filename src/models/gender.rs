use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 下注与揭晓共用的性别枚举，数据库内以字符串存储
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "gender")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    #[sea_orm(string_value = "BOY")]
    Boy,
    #[sea_orm(string_value = "GIRL")]
    Girl,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Boy => write!(f, "BOY"),
            Gender::Girl => write!(f, "GIRL"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "clue_type")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClueType {
    #[sea_orm(string_value = "ULTRASOUND")]
    Ultrasound,
    #[sea_orm(string_value = "SYMPTOM")]
    Symptom,
    #[sea_orm(string_value = "OTHER")]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_serde_round_trip() {
        let json = serde_json::to_string(&Gender::Boy).unwrap();
        assert_eq!(json, "\"BOY\"");
        let back: Gender = serde_json::from_str("\"GIRL\"").unwrap();
        assert_eq!(back, Gender::Girl);
    }

    #[test]
    fn test_gender_rejects_unknown_value() {
        assert!(serde_json::from_str::<Gender>("\"UNKNOWN\"").is_err());
        assert!(serde_json::from_str::<Gender>("\"boy\"").is_err());
    }
}
