pub mod check;
pub mod custom_methods;
pub mod dump;
pub mod model;

#[cfg(test)]
mod custom_methods_tests;
#[cfg(test)]
mod model_tests;
