pub mod pool_engine;
