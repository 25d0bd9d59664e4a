use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{BookingId, ClassId, MemberId, gym_class::GymClass};

/// 予約（1人の会員と1つのクラスの紐付け）
///
/// 作成後は変更されない。削除は会員・クラスの削除に伴うカスケードのみ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: BookingId,
    pub class_id: ClassId,
    pub member_id: MemberId,
    pub created_at: DateTime<Utc>,
}

/// 今後のクラス予約（プロフィール表示用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBooking {
    pub booking: Booking,
    pub class: GymClass,
}

/// 予約が拒否された理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingRejection {
    /// 定員に達している
    #[error("This class is already full.")]
    ClassFull,

    /// 同じ会員が同じクラスを既に予約している
    #[error("Member is already booked for this class.")]
    AlreadyBooked,
}

/// 純粋関数：予約の受け付け判定
///
/// ビジネスルール：
/// - 同じ会員が既に予約していれば AlreadyBooked（満席かどうかに関係なく）
/// - 既存予約数が定員以上なら ClassFull
///
/// 呼び出し側は、既存予約数の取得から予約の挿入までを
/// クラス単位で直列化した状態で呼び出すこと（定員超過を防ぐため）。
pub fn admit(class: &GymClass, booked: i64, already_booked: bool) -> Result<(), BookingRejection> {
    if already_booked {
        return Err(BookingRejection::AlreadyBooked);
    }
    if booked >= i64::from(class.capacity.value()) {
        return Err(BookingRejection::ClassFull);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Capacity;
    use chrono::Duration;

    fn class_with_capacity(capacity: i32) -> GymClass {
        let start = Utc::now() + Duration::days(1);
        GymClass {
            id: ClassId::from_raw(1),
            title: "Spin".to_string(),
            trainer_name: None,
            start_time: start,
            end_time: start + Duration::hours(1),
            capacity: Capacity::new(capacity).unwrap(),
        }
    }

    #[test]
    fn test_admit_when_seats_remain() {
        let class = class_with_capacity(2);
        assert!(admit(&class, 0, false).is_ok());
        assert!(admit(&class, 1, false).is_ok());
    }

    #[test]
    fn test_admit_rejects_when_full() {
        let class = class_with_capacity(2);
        assert_eq!(admit(&class, 2, false), Err(BookingRejection::ClassFull));
    }

    // 何らかの理由で定員を超えていても受け付けない
    #[test]
    fn test_admit_rejects_when_over_capacity() {
        let class = class_with_capacity(2);
        assert_eq!(admit(&class, 5, false), Err(BookingRejection::ClassFull));
    }

    // 満席でも、既に予約済みの会員には重複として答える
    #[test]
    fn test_admit_reports_duplicate_before_full() {
        let class = class_with_capacity(2);
        assert_eq!(admit(&class, 1, true), Err(BookingRejection::AlreadyBooked));
        assert_eq!(admit(&class, 2, true), Err(BookingRejection::AlreadyBooked));
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            BookingRejection::ClassFull.to_string(),
            "This class is already full."
        );
        assert_eq!(
            BookingRejection::AlreadyBooked.to_string(),
            "Member is already booked for this class."
        );
    }
}
