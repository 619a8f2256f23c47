mod graph_backward;
mod graph_basic;
mod graph_forward;
mod layer_linear;
mod node_loss;
mod optimizer;
mod var;
