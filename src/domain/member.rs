use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DomainValidationError, Email, MemberId, PlanId, required_text};

/// 会員ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MemberStatus {
    /// 利用中
    #[default]
    Active,
    /// 休会中
    Frozen,
    /// 期限切れ
    Expired,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "Active",
            MemberStatus::Frozen => "Frozen",
            MemberStatus::Expired => "Expired",
        }
    }
}

impl std::str::FromStr for MemberStatus {
    type Err = DomainValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(MemberStatus::Active),
            "Frozen" => Ok(MemberStatus::Frozen),
            "Expired" => Ok(MemberStatus::Expired),
            other => Err(DomainValidationError::InvalidStatus(other.to_string())),
        }
    }
}

/// 会員
///
/// パスワードハッシュは認証ポート経由でのみ扱い、この型には含めない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub full_name: String,
    pub email: Email,
    pub phone_number: Option<String>,
    pub status: MemberStatus,
    pub join_date: DateTime<Utc>,
    pub membership_plan_id: Option<PlanId>,
}

/// 新規会員（永続化前）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub full_name: String,
    pub email: Email,
    pub phone_number: Option<String>,
    pub status: MemberStatus,
    pub join_date: DateTime<Utc>,
}

impl NewMember {
    /// 会員登録の入力を検証する
    ///
    /// 氏名とメールアドレスは必須。電話番号は空文字なら未設定として扱う。
    pub fn register(
        full_name: &str,
        email: &str,
        phone_number: Option<&str>,
        joined_at: DateTime<Utc>,
    ) -> Result<Self, DomainValidationError> {
        Ok(Self {
            full_name: required_text("Full name", full_name)?,
            email: Email::parse(email)?,
            phone_number: normalize_phone(phone_number),
            status: MemberStatus::Active,
            join_date: joined_at,
        })
    }
}

/// 会員情報の部分更新
///
/// None のフィールドは変更しない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberChanges {
    pub full_name: Option<String>,
    pub email: Option<Email>,
    pub phone_number: Option<String>,
    pub status: Option<MemberStatus>,
}

impl MemberChanges {
    pub fn parse(
        full_name: Option<&str>,
        email: Option<&str>,
        phone_number: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self, DomainValidationError> {
        Ok(Self {
            full_name: full_name
                .map(|name| required_text("Full name", name))
                .transpose()?,
            email: email.map(Email::parse).transpose()?,
            phone_number: phone_number.map(|p| p.trim().to_string()),
            status: status.map(str::parse).transpose()?,
        })
    }

    /// 既存の会員に変更を適用する
    pub fn apply(&self, member: &Member) -> Member {
        Member {
            full_name: self
                .full_name
                .clone()
                .unwrap_or_else(|| member.full_name.clone()),
            email: self.email.clone().unwrap_or_else(|| member.email.clone()),
            phone_number: match &self.phone_number {
                Some(p) if p.is_empty() => None,
                Some(p) => Some(p.clone()),
                None => member.phone_number.clone(),
            },
            status: self.status.unwrap_or(member.status),
            ..member.clone()
        }
    }
}

fn normalize_phone(phone_number: Option<&str>) -> Option<String> {
    phone_number
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_member() -> Member {
        Member {
            id: MemberId::from_raw(1),
            full_name: "Asha Rao".to_string(),
            email: Email::parse("asha@example.com").unwrap(),
            phone_number: Some("555-0100".to_string()),
            status: MemberStatus::Active,
            join_date: Utc::now(),
            membership_plan_id: None,
        }
    }

    #[test]
    fn test_register_defaults_to_active() {
        let member = NewMember::register("Asha Rao", "asha@example.com", None, Utc::now()).unwrap();
        assert_eq!(member.status, MemberStatus::Active);
        assert_eq!(member.phone_number, None);
    }

    #[test]
    fn test_register_requires_full_name() {
        let result = NewMember::register("  ", "asha@example.com", None, Utc::now());
        assert_eq!(
            result.unwrap_err(),
            DomainValidationError::Required("Full name")
        );
    }

    #[test]
    fn test_register_treats_blank_phone_as_missing() {
        let member =
            NewMember::register("Asha", "asha@example.com", Some("  "), Utc::now()).unwrap();
        assert_eq!(member.phone_number, None);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Frozen".parse::<MemberStatus>().unwrap(), MemberStatus::Frozen);
        assert!("frozen".parse::<MemberStatus>().is_err());
    }

    #[test]
    fn test_changes_apply_only_given_fields() {
        let member = sample_member();
        let changes = MemberChanges::parse(None, None, None, Some("Expired")).unwrap();
        let updated = changes.apply(&member);

        assert_eq!(updated.status, MemberStatus::Expired);
        assert_eq!(updated.full_name, member.full_name);
        assert_eq!(updated.email, member.email);
        assert_eq!(updated.phone_number, member.phone_number);
    }

    #[test]
    fn test_changes_clear_phone_with_empty_string() {
        let member = sample_member();
        let changes = MemberChanges::parse(None, None, Some(""), None).unwrap();
        assert_eq!(changes.apply(&member).phone_number, None);
    }

    #[test]
    fn test_changes_reject_invalid_status() {
        let result = MemberChanges::parse(None, None, None, Some("Deleted"));
        assert!(matches!(
            result,
            Err(DomainValidationError::InvalidStatus(_))
        ));
    }
}
