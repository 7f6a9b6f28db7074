pub mod charts;
pub mod notification_banner;
pub mod operation_form;
pub mod operation_table;

pub use charts::ChartCanvas;
pub use notification_banner::NotificationBanner;
pub use operation_form::OperationForm;
pub use operation_table::OperationTable;
