// ==========================================
// 造船工单时间线引擎 - 日期推算
// ==========================================
// 职责: 偏移天数 → 日历日期; 日期 → 距 "现在" 的有符号天数
// 红线: "现在" 一律由调用方显式传入,引擎内部不读系统时钟
// 说明: 日期统一锚定到当日 12:00,避免夏令时引起的跨日漂移
// ==========================================

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// 日期锚点时刻（正午）
pub fn midday(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN))
}

/// 读取系统当前时刻（仅供最外层调用方使用）
pub fn system_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// 开工日期 + 偏移天数 → 日历日期
///
/// - 开工日期缺失 → None
/// - 按自然日累加（非工作日）
/// - 超出日期范围 → None
pub fn project(start: Option<NaiveDate>, day_offset: i64) -> Option<NaiveDate> {
    start?.checked_add_signed(Duration::try_days(day_offset)?)
}

/// 日期往前回退若干天
pub fn shift_back(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::try_days(days)?)
}

/// 距 "现在" 的有符号天数（未来为正）
///
/// 毫秒差 / 86_400_000 后四舍五入（半数向上取整,≥12h 计入相邻日）
pub fn distance_from_today(date: Option<NaiveDate>, now: NaiveDateTime) -> Option<i64> {
    let millis = (midday(date?) - now).num_milliseconds();
    Some(round_half_up(millis as f64 / MILLIS_PER_DAY))
}

/// 自某日期起经过的自然日数（钳制为 ≥ 0）
///
/// 用于 "工单当前第几天"; 只比较日历日期,同一天内不随时刻变化; 开工日在未来时返回 0
pub fn days_since(date: Option<NaiveDate>, now: NaiveDateTime) -> Option<i64> {
    Some((now.date() - date?).num_days().max(0))
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
