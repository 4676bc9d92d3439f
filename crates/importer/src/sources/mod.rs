pub mod wushujudges;
