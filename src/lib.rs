pub mod chart;
pub mod experiment;
pub mod report;
pub mod results;
pub mod summary;

#[cfg(test)]
mod test;
