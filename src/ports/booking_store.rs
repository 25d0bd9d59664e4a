use crate::domain::{
    ClassId, MemberId,
    booking::{Booking, BookingRejection, UpcomingBooking},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Result;

/// 予約の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationOutcome {
    /// 予約成立
    Booked(Booking),
    /// クラスが存在しない
    ClassNotFound,
    /// 会員が存在しない
    MemberNotFound,
    /// 定員超過または重複予約
    Rejected(BookingRejection),
}

/// 予約ストアポート
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// 定員チェック付きで予約を作成する
    ///
    /// クラスの取得、既存予約数の取得、受け付け判定（`domain::booking::admit`）、
    /// 挿入までを1つの不可分な操作として実行しなければならない。
    /// 同じクラスへの同時予約は直列化され、定員を超える予約は作られない。
    ///
    /// 判定順序：クラス存在 → 会員存在 → 重複 → 定員
    async fn reserve(
        &self,
        class_id: ClassId,
        member_id: MemberId,
        booked_at: DateTime<Utc>,
    ) -> Result<ReservationOutcome>;

    /// 会員の今後の予約（開始時刻が `from` 以降のクラス、開始時刻順）
    async fn upcoming_for_member(
        &self,
        member_id: MemberId,
        from: DateTime<Utc>,
    ) -> Result<Vec<UpcomingBooking>>;
}
