//! 测评记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub level: Option<String>,
    pub language: Option<String>,
    pub status: String,
    pub score: Option<f64>,
    pub max_score: f64,
    #[sea_orm(column_type = "Text")]
    pub details: String,
    pub media_token: Option<String>,
    pub question_id: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub reviewer_id: Option<i64>,
    pub completed_at: i64,
    pub reviewed_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assessment(self) -> crate::models::assessments::entities::Assessment {
        use super::ts_to_datetime;
        use crate::models::assessments::entities::{
            Assessment, AssessmentKind, AssessmentStatus,
        };

        Assessment {
            id: self.id,
            user_id: self.user_id,
            kind: self
                .kind
                .parse::<AssessmentKind>()
                .unwrap_or(AssessmentKind::Puzzle),
            level: self.level.and_then(|l| l.parse().ok()),
            language: self.language,
            status: self
                .status
                .parse::<AssessmentStatus>()
                .unwrap_or(AssessmentStatus::Completed),
            score: self.score,
            max_score: self.max_score,
            details: serde_json::from_str(&self.details).unwrap_or(serde_json::Value::Null),
            media_token: self.media_token,
            question_id: self.question_id,
            feedback: self.feedback,
            reviewer_id: self.reviewer_id,
            completed_at: ts_to_datetime(self.completed_at),
            reviewed_at: self.reviewed_at.map(ts_to_datetime),
            created_at: ts_to_datetime(self.created_at),
        }
    }
}
