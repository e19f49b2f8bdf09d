mod assessment_vm;
mod calendar_vm;
mod chat_vm;
mod markdown_vm;
mod path_vm;
mod time_fmt;

pub use assessment_vm::{
    QuestionVm, ResultRowVm, ResultTableVm, map_questions, map_result_table,
};
pub use calendar_vm::{DayCellVm, EventChipVm, MonthVm, WEEKDAY_LABELS, map_month};
pub use chat_vm::{MessageVm, SessionRowVm, map_session_rows, map_transcript};
pub use markdown_vm::markdown_to_html;
pub use path_vm::{
    DeadlineRowVm, PathCardVm, StatTilesVm, map_deadline_rows, map_path_cards, map_stat_tiles,
};
pub use time_fmt::{format_date, format_date_opt, format_datetime};
