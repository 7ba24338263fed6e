pub mod eval_funcs;
pub mod fitness;
