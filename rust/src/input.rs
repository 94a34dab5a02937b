//! JSON graph input.
//!
//! Accepts documents of the form
//! `{"directed": true, "n": 4, "edges": [{"u": 0, "v": 1, "w": 3}], "source": 0, "weight_model": "edge"}`.
//! Numbers and booleans may also be written as strings (`"n": "4"`), which
//! is what older dataset files contain.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use thiserror::Error;

use crate::error::GraphError;
use crate::graph::{Graph, VertexId, Weight};

/// Errors that can occur while reading graph input.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("edge {index} ({u} -> {v}) references a vertex outside 0..{n}")]
    EdgeOutOfRange {
        index: usize,
        u: VertexId,
        v: VertexId,
        n: usize,
    },
    #[error("source vertex {vertex} outside 0..{n}")]
    SourceOutOfRange { vertex: VertexId, n: usize },
}

impl From<InputError> for GraphError {
    fn from(err: InputError) -> Self {
        GraphError::InvalidInput(err.to_string())
    }
}

/// One weighted edge of the input document.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct EdgeInput {
    #[serde(deserialize_with = "lenient")]
    pub u: VertexId,
    #[serde(deserialize_with = "lenient")]
    pub v: VertexId,
    #[serde(deserialize_with = "lenient")]
    pub w: Weight,
}

/// A graph document as read from JSON.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GraphInput {
    #[serde(default = "default_directed", deserialize_with = "lenient")]
    pub directed: bool,
    #[serde(deserialize_with = "lenient")]
    pub n: usize,
    #[serde(default)]
    pub edges: Vec<EdgeInput>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub source: Option<VertexId>,
    /// Free-text tag describing what the weights mean; display only.
    #[serde(default = "default_weight_model")]
    pub weight_model: String,
}

fn default_directed() -> bool {
    true
}

fn default_weight_model() -> String {
    "edge".to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Native(T),
    Text(String),
}

impl<T> Lenient<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    fn resolve<E: de::Error>(self) -> Result<T, E> {
        match self {
            Lenient::Native(value) => Ok(value),
            Lenient::Text(text) => text.trim().parse().map_err(E::custom),
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Lenient::<T>::deserialize(deserializer)?.resolve()
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Option::<Lenient<T>>::deserialize(deserializer)?
        .map(|value| value.resolve())
        .transpose()
}

impl GraphInput {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, InputError> {
        let input: GraphInput = serde_json::from_str(text)?;
        input.validate()?;
        Ok(input)
    }

    fn validate(&self) -> Result<(), InputError> {
        for (index, edge) in self.edges.iter().enumerate() {
            if edge.u >= self.n || edge.v >= self.n {
                return Err(InputError::EdgeOutOfRange {
                    index,
                    u: edge.u,
                    v: edge.v,
                    n: self.n,
                });
            }
        }
        if let Some(source) = self.source {
            if source >= self.n {
                return Err(InputError::SourceOutOfRange {
                    vertex: source,
                    n: self.n,
                });
            }
        }
        Ok(())
    }

    /// Build the graph described by this document.
    pub fn to_graph(&self) -> Result<Graph, GraphError> {
        Graph::from_edges(
            self.n,
            self.directed,
            self.edges.iter().map(|e| (e.u, e.v, e.w)),
        )
    }
}
