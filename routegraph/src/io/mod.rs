/// Reading and writing graphs as plain text edge lists.
pub mod edge_list;
