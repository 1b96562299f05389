use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::enums::string_enum;

string_enum! {
    /// 测评类型
    pub enum AssessmentKind: "测评类型" {
        Listening => "listening",
        Speaking => "speaking",
        Writing => "writing",
        Presentation => "presentation",
        Puzzle => "puzzle",
        LeetCode => "leetcode",
    }
}

impl AssessmentKind {
    /// 需要评审员人工评分
    pub fn requires_review(&self) -> bool {
        matches!(self, AssessmentKind::Speaking | AssessmentKind::Presentation)
    }

    /// 语言类测评：需要级别与语言，并受重测冷却期限制
    pub fn is_language(&self) -> bool {
        matches!(
            self,
            AssessmentKind::Listening | AssessmentKind::Speaking | AssessmentKind::Writing
        )
    }

    pub fn has_cooldown(&self) -> bool {
        self.is_language()
    }

    /// 提交时即带分数的类型
    pub fn is_auto_scored(&self) -> bool {
        matches!(
            self,
            AssessmentKind::Listening | AssessmentKind::Writing | AssessmentKind::Puzzle
        )
    }
}

string_enum! {
    /// 测评级别（同时用作演讲题目难度）
    pub enum AssessmentLevel: "测评级别" {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

string_enum! {
    /// 测评状态
    pub enum AssessmentStatus: "测评状态" {
        Completed => "completed",
        PendingReview => "pending_review",
        Reviewed => "reviewed",
    }
}

/// 测评记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct Assessment {
    pub id: i64,
    pub user_id: i64,
    pub kind: AssessmentKind,
    pub level: Option<AssessmentLevel>,
    pub language: Option<String>,
    pub status: AssessmentStatus,
    pub score: Option<f64>,
    pub max_score: f64,
    /// 各类型自带的作答详情（题目、答案、统计快照等）
    #[ts(type = "unknown")]
    pub details: serde_json::Value,
    pub media_token: Option<String>,
    pub question_id: Option<i64>,
    pub feedback: Option<String>,
    pub reviewer_id: Option<i64>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// 得分百分比，未评分返回 None
    pub fn percentage(&self) -> Option<f64> {
        score_percentage(self.score?, self.max_score)
    }
}

/// score / max_score * 100，保留两位小数
pub fn score_percentage(score: f64, max_score: f64) -> Option<f64> {
    if max_score <= 0.0 {
        return None;
    }
    Some(round2(score / max_score * 100.0))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 待写入的测评记录
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub user_id: i64,
    pub kind: AssessmentKind,
    pub level: Option<AssessmentLevel>,
    pub language: Option<String>,
    pub status: AssessmentStatus,
    pub score: Option<f64>,
    pub max_score: f64,
    pub details: serde_json::Value,
    pub media_token: Option<String>,
    pub question_id: Option<i64>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// 冷却期查询键
#[derive(Debug, Clone, PartialEq)]
pub struct CooldownKey {
    pub user_id: i64,
    pub kind: AssessmentKind,
    pub level: AssessmentLevel,
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_categories() {
        assert!(AssessmentKind::Speaking.requires_review());
        assert!(AssessmentKind::Presentation.requires_review());
        assert!(!AssessmentKind::Listening.requires_review());

        assert!(AssessmentKind::Writing.has_cooldown());
        assert!(!AssessmentKind::Puzzle.has_cooldown());
        assert!(!AssessmentKind::LeetCode.has_cooldown());
        assert!(!AssessmentKind::Presentation.has_cooldown());

        assert!(AssessmentKind::Puzzle.is_auto_scored());
        assert!(!AssessmentKind::LeetCode.is_auto_scored());
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&AssessmentKind::LeetCode).unwrap();
        assert_eq!(json, r#""leetcode""#);
        let status: AssessmentStatus = serde_json::from_str(r#""pending_review""#).unwrap();
        assert_eq!(status, AssessmentStatus::PendingReview);
    }

    #[test]
    fn test_score_percentage() {
        assert_eq!(score_percentage(2.0, 3.0), Some(66.67));
        assert_eq!(score_percentage(100.0, 100.0), Some(100.0));
        assert_eq!(score_percentage(5.0, 0.0), None);
    }
}
