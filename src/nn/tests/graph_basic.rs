use crate::assert_err;
use crate::nn::{Graph, GraphError, GraphInner, Init, NodeId};
use crate::tensor::Tensor;

#[test]
fn test_new_graph() {
    let graph = GraphInner::new();
    assert_eq!(graph.name(), "default_graph");
    assert_eq!(graph.nodes_count(), 0);
    assert!(graph.is_train_mode());
    assert!(!graph.has_seed());

    let named = GraphInner::with_name("gan");
    assert_eq!(named.name(), "gan");
}

#[test]
fn test_node_id_starts_from_one() {
    let mut graph = GraphInner::new();
    let a = graph.new_input_node(&[2, 3], None).unwrap();
    let b = graph.new_parameter_node(&[3, 1], None).unwrap();
    assert_eq!(a, NodeId(1));
    assert_eq!(b, NodeId(2));
    assert_eq!(graph.nodes(), vec![NodeId(1), NodeId(2)]);
}

#[test]
fn test_node_name_generation() {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[2, 2], None).unwrap();
    let w = graph.new_parameter_node(&[2, 2], Some("w")).unwrap();

    // 1. 显式命名
    let m1 = graph.new_mat_mul_node(x, w, Some("xw")).unwrap();
    assert_eq!(graph.get_node_name(m1).unwrap(), "xw");

    // 2. 自动命名
    assert_eq!(graph.get_node_name(x).unwrap(), "input_1");
    let m2 = graph.new_mat_mul_node(x, w, None).unwrap();
    assert_eq!(graph.get_node_name(m2).unwrap(), "mat_mul_1");
    let r = graph.new_relu_node(m2, None).unwrap();
    assert_eq!(graph.get_node_name(r).unwrap(), "relu_1");
    let lr = graph.new_leaky_relu_node(m2, 0.1, None).unwrap();
    assert_eq!(graph.get_node_name(lr).unwrap(), "leaky_relu_1");

    // 3. 名称重复
    let result = graph.new_mat_mul_node(x, w, Some("xw"));
    assert_err!(
        result,
        GraphError::DuplicateNodeName("节点xw在图default_graph中重复")
    );
}

#[test]
fn test_edges_keep_parent_order() {
    let mut graph = GraphInner::new();
    let a = graph.new_input_node(&[1, 1], None).unwrap();
    let b = graph.new_parameter_node(&[1, 1], None).unwrap();
    let sub = graph.new_subtract_node(b, a, None).unwrap();
    assert_eq!(graph.get_node_parents(sub).unwrap(), vec![b, a]);
    assert_eq!(graph.get_node_children(a).unwrap(), vec![sub]);

    // 同一个节点作为两个父节点（x * x）
    let sq = graph.new_multiply_node(b, b, None).unwrap();
    assert_eq!(graph.get_node_parents(sq).unwrap(), vec![b, b]);
}

#[test]
fn test_node_not_found() {
    let graph = GraphInner::new();
    assert_err!(graph.get_node_value(NodeId(42)), GraphError::NodeNotFound(NodeId(42)));
    assert_err!(graph.get_node_parents(NodeId(7)), GraphError::NodeNotFound(NodeId(7)));
}

#[test]
fn test_input_node_value_rules() {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[4, 2], Some("x")).unwrap();
    assert!(graph.get_node_value(x).unwrap().is_none());

    // 第一维（批大小）可以变化
    graph
        .set_node_value(x, Some(&Tensor::zeros(&[7, 2])))
        .unwrap();
    assert_eq!(graph.get_node_value(x).unwrap().unwrap().shape(), &[7, 2]);

    // 其余维度不能变化
    assert_err!(
        graph.set_node_value(x, Some(&Tensor::zeros(&[7, 3]))),
        GraphError::ShapeMismatch { expected, got, .. } if expected == &[4, 2] && got == &[7, 3]
    );
    // 阶数也不能变化
    assert_err!(
        graph.set_node_value(x, Some(&Tensor::zeros(&[8]))),
        GraphError::ShapeMismatch { .. }
    );

    // 输入节点没有梯度
    assert_err!(graph.get_node_grad(x), GraphError::InvalidOperation(_));
}

#[test]
fn test_invalid_input_shape() {
    let mut graph = GraphInner::new();
    assert_err!(graph.new_input_node(&[], None), GraphError::InvalidOperation(_));
    assert_err!(graph.new_input_node(&[0, 3], None), GraphError::InvalidOperation(_));
}

#[test]
fn test_parameter_node_value_rules() {
    let mut graph = GraphInner::new();
    assert_err!(
        graph.new_parameter_node(&[2, 3, 4], None),
        GraphError::DimensionMismatch { expected: 2, got: 3, .. }
    );

    let w = graph.new_parameter_node(&[2, 3], None).unwrap();
    graph
        .set_node_value(w, Some(&Tensor::ones(&[2, 3])))
        .unwrap();
    assert_err!(
        graph.set_node_value(w, Some(&Tensor::ones(&[3, 3]))),
        GraphError::ShapeMismatch { .. }
    );
    assert_eq!(graph.get_trainable_nodes(), vec![w]);
}

#[test]
fn test_op_node_value_cannot_be_set() {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[1, 1], None).unwrap();
    let s = graph.new_sigmoid_node(x, None).unwrap();
    assert_err!(
        graph.set_node_value(s, Some(&Tensor::zeros(&[1, 1]))),
        GraphError::InvalidOperation(_)
    );
}

#[test]
fn test_graph_handle_creation_methods() {
    let graph = Graph::new_with_seed(42);
    let x = graph.input(&Tensor::ones(&[2, 3])).unwrap();
    let named = graph.input_named(&Tensor::ones(&[2, 3]), "images").unwrap();
    let placeholder = graph.input_shape(&[5, 3], Some("z")).unwrap();
    let w = graph.parameter(&[3, 4], Init::Zeros, "w").unwrap();
    let c = graph.constant(&Tensor::scalar(2.0)).unwrap();
    let zeros = graph.zeros(&[2, 2]).unwrap();
    let ones = graph.ones(&[2, 2]).unwrap();
    let noise = graph.randn(&[10, 4]).unwrap();

    assert_eq!(graph.nodes_count(), 8);
    assert_eq!(graph.parameters_count(), 1);
    assert_eq!(named.name().unwrap(), "images");
    assert!(placeholder.value().unwrap().is_none());
    assert_eq!(placeholder.value_expected_shape().unwrap(), vec![5, 3]);
    assert_eq!(w.value().unwrap().unwrap(), Tensor::zeros(&[3, 4]));
    assert_eq!(c.item().unwrap(), 2.0);
    assert_eq!(zeros.value().unwrap().unwrap().sum_value(), 0.0);
    assert_eq!(ones.value().unwrap().unwrap().sum_value(), 4.0);
    assert_eq!(noise.value().unwrap().unwrap().shape(), &[10, 4]);
    assert!(x.same_graph(&w));

    let other = Graph::new();
    assert!(!x.same_graph(&other.input(&Tensor::ones(&[1, 1])).unwrap()));
    assert!(x.get_graph().same_graph(&graph));
}

#[test]
fn test_seeded_graph_parameters_are_reproducible() {
    let init = || {
        let graph = Graph::new_with_seed(7);
        graph
            .parameter(&[4, 4], Init::Normal { mean: 0.0, std: 1.0 }, "w")
            .unwrap()
            .value()
            .unwrap()
            .unwrap()
    };
    assert_eq!(init(), init());
}

#[test]
fn test_train_eval_mode() {
    let graph = Graph::new();
    assert!(!graph.is_eval());
    graph.eval();
    assert!(graph.is_eval());
    graph.train();
    assert!(!graph.is_eval());
}
