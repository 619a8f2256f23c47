use crate::gan::{Discriminator, GanConfig, Generator};
use crate::nn::{Graph, Module};
use crate::tensor::Tensor;

use super::tiny_config;

#[test]
fn test_default_parameter_counts() {
    let graph = Graph::new_with_seed(0);
    let config = GanConfig::default();
    let generator = Generator::new(&graph, &config).unwrap();
    let discriminator = Discriminator::new(&graph, &config).unwrap();

    assert_eq!(generator.num_params(), 4);
    assert_eq!(generator.num_elements(), 64 * 256 + 256 + 256 * 784 + 784);
    assert_eq!(discriminator.num_params(), 4);
    assert_eq!(discriminator.num_elements(), 784 * 128 + 128 + 128 + 1);
    assert_eq!(generator.z_dim(), 64);
    assert_eq!(generator.image_dim(), 784);
    assert_eq!(discriminator.image_dim(), 784);
    assert_eq!(graph.parameters_count(), 8);
}

#[test]
fn test_forward_shapes_and_ranges() {
    let graph = Graph::new_with_seed(1);
    let config = tiny_config();
    let generator = Generator::new(&graph, &config).unwrap();
    let discriminator = Discriminator::new(&graph, &config).unwrap();

    let z = graph.randn(&[5, 4]).unwrap();
    let fake = generator.forward(&z).unwrap();
    let score = discriminator.forward(&fake).unwrap();
    score.forward().unwrap();

    let images = fake.value().unwrap().unwrap();
    assert_eq!(images.shape(), &[5, 16]);
    assert!(images.to_vec().iter().all(|&v| v > -1.0 && v < 1.0));

    let probs = score.value().unwrap().unwrap();
    assert_eq!(probs.shape(), &[5, 1]);
    assert!(probs.to_vec().iter().all(|&p| p > 0.0 && p < 1.0));
}

#[test]
fn test_discriminator_accepts_any_batch() {
    let graph = Graph::new_with_seed(2);
    let discriminator = Discriminator::new(&graph, &tiny_config()).unwrap();
    let x = graph.input(&Tensor::zeros(&[2, 16])).unwrap();
    let out = discriminator.forward(&x).unwrap();
    out.forward().unwrap();
    assert_eq!(out.value().unwrap().unwrap().shape(), &[2, 1]);

    x.set_value(&Tensor::zeros(&[7, 16])).unwrap();
    out.forward().unwrap();
    assert_eq!(out.value().unwrap().unwrap().shape(), &[7, 1]);
}

#[test]
fn test_two_generators_on_one_graph_conflict() {
    let graph = Graph::new();
    let config = tiny_config();
    Generator::new(&graph, &config).unwrap();
    assert!(Generator::new(&graph, &config).is_err());
}
