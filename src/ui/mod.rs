pub mod allocation_view;
pub mod chart_utils;
pub mod dashboard;
pub mod performance_view;
pub mod weights_table;
