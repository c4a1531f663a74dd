pub mod evolution_tree;
