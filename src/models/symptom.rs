use crate::entities::symptom_entity as symptoms;
use crate::models::Gender;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSymptomRequest {
    #[schema(example = "肚型")]
    pub category: String,
    pub boy_description: String,
    pub girl_description: String,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

/// 部分更新：缺省字段保持原值
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSymptomRequest {
    pub category: Option<String>,
    pub boy_description: Option<String>,
    pub girl_description: Option<String>,
    /// 外层 None 表示字段缺省（保持原值），内层 None 表示显式 null（取消勾选）
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    #[schema(value_type = Option<Gender>, nullable)]
    pub checked_gender: Option<Option<Gender>>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

/// 区分“字段缺省”与“显式传 null”的序列化辅助
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ToggleSymptomRequest {
    /// BOY / GIRL，null 表示取消勾选
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymptomResponse {
    pub id: i64,
    pub category: String,
    pub boy_description: String,
    pub girl_description: String,
    pub checked_gender: Option<Gender>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<symptoms::Model> for SymptomResponse {
    fn from(symptom: symptoms::Model) -> Self {
        Self {
            id: symptom.id,
            category: symptom.category,
            boy_description: symptom.boy_description,
            girl_description: symptom.girl_description,
            checked_gender: symptom.checked_gender,
            sort_order: symptom.sort_order,
            created_at: symptom.created_at,
            updated_at: symptom.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_absent_from_null() {
        let absent: UpdateSymptomRequest = serde_json::from_str(r#"{"category":"肚型"}"#).unwrap();
        assert_eq!(absent.checked_gender, None);

        let null: UpdateSymptomRequest =
            serde_json::from_str(r#"{"checkedGender":null}"#).unwrap();
        assert_eq!(null.checked_gender, Some(None));

        let set: UpdateSymptomRequest =
            serde_json::from_str(r#"{"checkedGender":"BOY"}"#).unwrap();
        assert_eq!(set.checked_gender, Some(Some(Gender::Boy)));
    }
}
