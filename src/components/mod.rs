//! UI building blocks shared by the pages.

pub mod charts;
pub mod forms;
pub mod knowledge_graph;
pub mod prescription;
