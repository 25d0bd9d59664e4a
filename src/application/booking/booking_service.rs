use crate::domain::{booking::Booking, commands::CreateBooking};
use crate::ports::ReservationOutcome;
use tracing::{info, warn};

use crate::application::{ApplicationError, Result, ServiceDependencies};

/// クラスを予約する
///
/// ビジネスルール：
/// - クラスが存在すること
/// - 会員が存在すること
/// - 同じ会員が同じクラスを重複して予約しないこと
/// - 既存予約数が定員未満であること
///
/// # 一貫性保証
///
/// 定員チェックと挿入は `BookingStore::reserve` の中で不可分に実行される。
/// 同一クラスへの同時リクエストが定員を超えて予約を作ることはない。
///
/// # 戻り値
/// 作成された予約
pub async fn create_booking(deps: &ServiceDependencies, cmd: CreateBooking) -> Result<Booking> {
    let outcome = deps
        .bookings
        .reserve(cmd.class_id, cmd.member_id, cmd.booked_at)
        .await
        .map_err(ApplicationError::StoreError)?;

    match outcome {
        ReservationOutcome::Booked(booking) => {
            info!(
                booking_id = %booking.id,
                class_id = %booking.class_id,
                member_id = %booking.member_id,
                "Booking created"
            );
            Ok(booking)
        }
        ReservationOutcome::ClassNotFound => Err(ApplicationError::ClassNotFound),
        ReservationOutcome::MemberNotFound => Err(ApplicationError::MemberNotFound),
        ReservationOutcome::Rejected(rejection) => {
            warn!(
                class_id = %cmd.class_id,
                member_id = %cmd.member_id,
                reason = %rejection,
                "Booking rejected"
            );
            Err(rejection.into())
        }
    }
}
