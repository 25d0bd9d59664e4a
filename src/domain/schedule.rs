use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::{DomainValidationError, MemberId, ScheduleId, required_text};

/// 直近スケジュールとして扱う日数
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// スケジュール種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScheduleKind {
    #[default]
    Personal,
    Workout,
    Diet,
    Cardio,
    #[serde(rename = "Strength Training")]
    StrengthTraining,
    #[serde(rename = "Rest Day")]
    RestDay,
    Other,
}

impl ScheduleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleKind::Personal => "Personal",
            ScheduleKind::Workout => "Workout",
            ScheduleKind::Diet => "Diet",
            ScheduleKind::Cardio => "Cardio",
            ScheduleKind::StrengthTraining => "Strength Training",
            ScheduleKind::RestDay => "Rest Day",
            ScheduleKind::Other => "Other",
        }
    }
}

impl std::str::FromStr for ScheduleKind {
    type Err = DomainValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Personal" => Ok(ScheduleKind::Personal),
            "Workout" => Ok(ScheduleKind::Workout),
            "Diet" => Ok(ScheduleKind::Diet),
            "Cardio" => Ok(ScheduleKind::Cardio),
            "Strength Training" => Ok(ScheduleKind::StrengthTraining),
            "Rest Day" => Ok(ScheduleKind::RestDay),
            "Other" => Ok(ScheduleKind::Other),
            other => Err(DomainValidationError::InvalidScheduleKind(other.to_string())),
        }
    }
}

/// 曜日の英語名（"Monday" など）
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// 曜日名を解釈する。"Monday" と "Mon" のどちらも受け付ける
pub fn parse_weekday(raw: &str) -> Result<Weekday, DomainValidationError> {
    raw.trim()
        .parse::<Weekday>()
        .map_err(|_| DomainValidationError::InvalidWeekday(raw.to_string()))
}

/// 会員の個人スケジュール
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalSchedule {
    pub id: ScheduleId,
    pub member_id: MemberId,
    pub entry: ScheduleEntry,
}

/// スケジュールの内容（作成・全置換更新で共通）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub kind: ScheduleKind,
    pub is_recurring: bool,
    pub recurring_days: Vec<Weekday>,
}

impl ScheduleEntry {
    /// スケジュール入力を検証する
    ///
    /// 繰り返しでない場合、曜日指定は破棄する。
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: &str,
        description: Option<&str>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        kind: ScheduleKind,
        is_recurring: bool,
        recurring_days: Vec<Weekday>,
    ) -> Result<Self, DomainValidationError> {
        let title = required_text("Title", title)?;
        if end_time <= start_time {
            return Err(DomainValidationError::EndBeforeStart);
        }

        let mut recurring_days = if is_recurring {
            recurring_days
        } else {
            Vec::new()
        };
        recurring_days.sort_by_key(Weekday::num_days_from_monday);
        recurring_days.dedup();

        Ok(Self {
            title,
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            date,
            start_time,
            end_time,
            kind,
            is_recurring,
            recurring_days,
        })
    }
}

/// 日付範囲（両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DomainValidationError> {
        if from > to {
            return Err(DomainValidationError::InvertedRange);
        }
        Ok(Self { from, to })
    }

    /// 今日から7日後までの範囲
    pub fn upcoming(today: NaiveDate) -> Self {
        Self {
            from: today,
            to: today + Duration::days(UPCOMING_WINDOW_DAYS),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// 日付→開始時刻の順に並べる
pub fn sort_chronologically(schedules: &mut [PersonalSchedule]) {
    schedules.sort_by(|a, b| {
        (a.entry.date, a.entry.start_time, a.id).cmp(&(b.entry.date, b.entry.start_time, b.id))
    });
}
