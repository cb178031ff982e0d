pub mod schedule_tools;
