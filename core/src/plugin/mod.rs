pub mod sergeant;
