//! 演讲题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "presentation_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub topic: String,
    #[sea_orm(column_type = "Text")]
    pub prompt: String,
    pub difficulty: String,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_question(
        self,
    ) -> crate::models::presentation_questions::entities::PresentationQuestion {
        use super::ts_to_datetime;
        use crate::models::assessments::entities::AssessmentLevel;
        use crate::models::presentation_questions::entities::PresentationQuestion;

        PresentationQuestion {
            id: self.id,
            topic: self.topic,
            prompt: self.prompt,
            difficulty: self
                .difficulty
                .parse::<AssessmentLevel>()
                .unwrap_or(AssessmentLevel::Beginner),
            created_by: self.created_by,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
