use crate::database::DbPool;
use crate::entities::symptom_entity as symptoms;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateSymptomRequest, SymptomResponse, ToggleSymptomRequest, UpdateSymptomRequest,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryOrder, Set,
};

/// 预设孕徵列表（民间说法，仅供派对娱乐）
pub const DEFAULT_SYMPTOMS: [(&str, &str, &str, i32); 9] = [
    ("肚型", "尖尖", "圓圓", 1),
    ("皮膚", "會變糟", "變光滑", 2),
    ("喜食口味", "酸、鹹食", "甜、甜食", 3),
    ("肚臍", "突出", "不突出", 4),
    ("害喜反應", "不重", "重", 5),
    ("胎心音", "< 140", "> 140", 6),
    ("腳", "不水腫", "很水腫", 7),
    ("體溫", "偏高", "偏低", 8),
    ("心情", "愉快", "多變", 9),
];

pub struct SymptomService {
    pool: DbPool,
}

impl SymptomService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 孕徵列表（公开），按 order 升序
    pub async fn list(&self) -> AppResult<Vec<SymptomResponse>> {
        let list = symptoms::Entity::find()
            .order_by_asc(symptoms::Column::SortOrder)
            .all(self.pool.as_ref())
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 批量写入预设孕徵；已有任何数据时拒绝，防止重复播种
    pub async fn seed_defaults(&self) -> AppResult<Vec<SymptomResponse>> {
        let count = symptoms::Entity::find().count(self.pool.as_ref()).await?;
        if count > 0 {
            return Err(AppError::StateConflict(
                "Symptoms already exist - clear them before re-initializing".to_string(),
            ));
        }

        let models = DEFAULT_SYMPTOMS
            .iter()
            .map(|(category, boy, girl, order)| symptoms::ActiveModel {
                category: Set(category.to_string()),
                boy_description: Set(boy.to_string()),
                girl_description: Set(girl.to_string()),
                sort_order: Set(*order),
                ..Default::default()
            });
        symptoms::Entity::insert_many(models).exec(self.pool.as_ref()).await?;

        self.list().await
    }

    pub async fn create(&self, request: CreateSymptomRequest) -> AppResult<SymptomResponse> {
        if request.category.trim().is_empty()
            || request.boy_description.trim().is_empty()
            || request.girl_description.trim().is_empty()
        {
            return Err(AppError::ValidationError(
                "category, boyDescription, girlDescription are required".to_string(),
            ));
        }

        let symptom = symptoms::ActiveModel {
            category: Set(request.category),
            boy_description: Set(request.boy_description),
            girl_description: Set(request.girl_description),
            sort_order: Set(request.sort_order.unwrap_or(0)),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        Ok(symptom.into())
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateSymptomRequest,
    ) -> AppResult<SymptomResponse> {
        let symptom = self.find_symptom(id).await?;

        let mut am = symptom.into_active_model();
        if let Some(category) = request.category {
            am.category = Set(category);
        }
        if let Some(boy_description) = request.boy_description {
            am.boy_description = Set(boy_description);
        }
        if let Some(girl_description) = request.girl_description {
            am.girl_description = Set(girl_description);
        }
        // 外层 Some 才触发写入，内层 None 即显式取消勾选
        if let Some(checked_gender) = request.checked_gender {
            am.checked_gender = Set(checked_gender);
        }
        if let Some(sort_order) = request.sort_order {
            am.sort_order = Set(sort_order);
        }
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(self.pool.as_ref()).await?;

        Ok(updated.into())
    }

    /// 勾选/取消勾选孕徵倾向，null 为取消
    pub async fn toggle(&self, id: i64, request: ToggleSymptomRequest) -> AppResult<SymptomResponse> {
        let symptom = self.find_symptom(id).await?;

        let mut am = symptom.into_active_model();
        am.checked_gender = Set(request.gender);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(self.pool.as_ref()).await?;

        Ok(updated.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let symptom = self.find_symptom(id).await?;
        symptom.delete(self.pool.as_ref()).await?;
        Ok(())
    }

    /// 清空全部孕徵，返回删除条数
    pub async fn clear(&self) -> AppResult<u64> {
        let result = symptoms::Entity::delete_many().exec(self.pool.as_ref()).await?;
        Ok(result.rows_affected)
    }

    async fn find_symptom(&self, id: i64) -> AppResult<symptoms::Model> {
        symptoms::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Symptom not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::models::Gender;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::collections::BTreeMap;

    fn symptom_model(id: i64, category: &str, checked: Option<Gender>) -> symptoms::Model {
        symptoms::Model {
            id,
            category: category.to_string(),
            boy_description: "boy".to_string(),
            girl_description: "girl".to_string(),
            checked_gender: checked,
            sort_order: id as i32,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    fn count_row(n: i64) -> Vec<BTreeMap<&'static str, sea_orm::Value>> {
        vec![BTreeMap::from([(
            "num_items",
            sea_orm::Value::BigInt(Some(n)),
        )])]
    }

    #[test]
    fn test_default_symptoms_integrity() {
        assert_eq!(DEFAULT_SYMPTOMS.len(), 9);
        for (i, (category, boy, girl, order)) in DEFAULT_SYMPTOMS.iter().enumerate() {
            assert!(!category.is_empty());
            assert!(!boy.is_empty());
            assert!(!girl.is_empty());
            assert_eq!(*order, i as i32 + 1);
        }
    }

    #[tokio::test]
    async fn test_seed_rejected_when_rows_exist() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([count_row(3)])
            .into_connection();

        let err = SymptomService::new(Arc::new(db)).seed_defaults().await.unwrap_err();
        assert!(matches!(err, AppError::StateConflict(_)));
    }

    #[tokio::test]
    async fn test_toggle_clears_with_null() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![symptom_model(1, "肚型", Some(Gender::Boy))]])
            .append_query_results([vec![symptom_model(1, "肚型", None)]])
            .into_connection();

        let symptom = SymptomService::new(Arc::new(db))
            .toggle(1, ToggleSymptomRequest { gender: None })
            .await
            .unwrap();
        assert_eq!(symptom.checked_gender, None);
    }

    #[tokio::test]
    async fn test_update_with_explicit_null_clears_check() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![symptom_model(1, "肚型", Some(Gender::Girl))]])
            .append_query_results([vec![symptom_model(1, "肚型", None)]])
            .into_connection();

        let symptom = SymptomService::new(Arc::new(db))
            .update(
                1,
                UpdateSymptomRequest {
                    category: None,
                    boy_description: None,
                    girl_description: None,
                    checked_gender: Some(None),
                    sort_order: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(symptom.checked_gender, None);
    }

    #[tokio::test]
    async fn test_clear_reports_deleted_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 9,
            }])
            .into_connection();

        let deleted = SymptomService::new(Arc::new(db)).clear().await.unwrap();
        assert_eq!(deleted, 9);
    }
}
