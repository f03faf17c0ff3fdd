//! The simplification pipeline.

use tracing::trace;

use vn_search::PathNode;

use crate::pass::{CollinearTravelPass, FallColumnPass, JumpStepPass, Pass};
use crate::{convert, PathElement};

/// Conversion followed by an ordered list of passes.
pub struct Simplifier {
    passes: Vec<Box<dyn Pass + Send + Sync>>,
}

impl Simplifier {
    /// Collinear travel, then fall columns, then jump steps.
    pub fn standard() -> Self {
        Self {
            passes: vec![
                Box::new(CollinearTravelPass),
                Box::new(FallColumnPass),
                Box::new(JumpStepPass),
            ],
        }
    }

    /// A pipeline with no passes: conversion only.
    pub fn empty() -> Self {
        Self { passes: Vec::new() }
    }

    pub fn with_pass(mut self, pass: impl Pass + Send + Sync + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Convert search output and run every pass over it.
    pub fn simplify(&self, nodes: &[PathNode]) -> Vec<PathElement> {
        self.run(convert(nodes))
    }

    /// Run every pass over already-converted elements.
    pub fn run(&self, mut elements: Vec<PathElement>) -> Vec<PathElement> {
        for pass in &self.passes {
            let before = elements.len();
            elements = pass.apply(elements);
            trace!(pass = pass.name(), before, after = elements.len(), "simplifier pass");
        }
        elements
    }
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::standard()
    }
}
