pub mod nodejs;
