pub mod test_simulation;
