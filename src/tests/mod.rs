mod node_constant;
mod node_select_and_scatter;
