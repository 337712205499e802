//! Edge-list parsing.
//!
//! The format is a stream of whitespace-separated `origin destination`
//! integer pairs, any number per line. Reading stops quietly at the first
//! token that is not a valid node id; whatever follows is ignored.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::ops::Range;
use std::path::Path;

use tracing::{debug, warn};

use crate::builder::AdjacencyBuilder;
use crate::error::{GraphError, Result};
use crate::graph::{CsrGraph, NodeId};

/// Output of the two-pass read: graph bounds plus the filled adjacency lists.
#[derive(Debug)]
pub struct RawEdges {
    pub node_count: usize,
    pub edge_count: usize,
    pub adjacency: AdjacencyBuilder,
}

/// Graph bounds found by the sizing pass, before anything is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeListSize {
    pub node_count: usize,
    pub edge_count: usize,
}

impl EdgeListSize {
    /// Peak bytes held while loading: the adjacency lists and the CSR arrays
    /// coexist while the lists are flattened.
    ///
    /// Lists are counted at twice their length, the worst case of the
    /// doubling growth.
    pub fn estimated_load_bytes(&self) -> usize {
        use std::mem::size_of;

        let lists = self
            .node_count
            .saturating_mul(size_of::<Vec<NodeId>>())
            .saturating_add(self.edge_count.saturating_mul(2 * size_of::<NodeId>()));
        lists.saturating_add(CsrGraph::estimated_memory(
            self.node_count,
            self.edge_count,
        ))
    }
}

/// Open `path` and read it as an edge list.
///
/// With `max_bytes` set, the load is refused with
/// [`GraphError::MemoryLimit`] once the sizing pass shows the peak estimate
/// is over the cap; nothing large has been allocated at that point.
pub fn load(path: &Path, max_bytes: Option<usize>) -> Result<RawEdges> {
    let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
    let mut reader = BufReader::new(file);

    let size = size_edges(&mut reader).map_err(|e| GraphError::io(path, e))?;
    if let Some(max_bytes) = max_bytes {
        let required_bytes = size.estimated_load_bytes();
        if required_bytes > max_bytes {
            warn!(
                path = %path.display(),
                nodes = size.node_count,
                edges = size.edge_count,
                required_bytes,
                max_bytes,
                "edge list over memory cap"
            );
            return Err(GraphError::MemoryLimit {
                required_bytes,
                max_bytes,
            });
        }
    }

    fill_edges(&mut reader, size).map_err(|e| GraphError::io(path, e))
}

/// Read an edge list in two passes over the same stream.
///
/// Pass 1 finds the largest id and the number of pairs. The stream is then
/// rewound to where it started and pass 2 fills an [`AdjacencyBuilder`]
/// sized from pass 1.
pub fn read_edges<R: BufRead + Seek>(mut reader: R) -> io::Result<RawEdges> {
    let size = size_edges(&mut reader)?;
    fill_edges(&mut reader, size)
}

/// Pass 1: count pairs and find the largest id, then rewind the stream to
/// where it started.
pub fn size_edges<R: BufRead + Seek>(mut reader: R) -> io::Result<EdgeListSize> {
    let origin = reader.stream_position()?;

    let mut max_id: Option<NodeId> = None;
    let mut edge_count = 0usize;
    for pair in Pairs::new(&mut reader) {
        let (u, v) = pair?;
        let hi = u.max(v);
        max_id = Some(max_id.map_or(hi, |m| m.max(hi)));
        edge_count += 1;
    }
    let node_count = max_id.map_or(0, |m| m as usize + 1);
    debug!(nodes = node_count, edges = edge_count, "edge list sized");

    reader.seek(SeekFrom::Start(origin))?;
    Ok(EdgeListSize {
        node_count,
        edge_count,
    })
}

/// Pass 2: fill adjacency lists from a stream positioned where pass 1
/// started.
fn fill_edges<R: BufRead>(mut reader: R, size: EdgeListSize) -> io::Result<RawEdges> {
    let EdgeListSize {
        node_count,
        edge_count,
    } = size;

    let mut adjacency = AdjacencyBuilder::new(node_count);
    for pair in Pairs::new(&mut reader).take(edge_count) {
        let (u, v) = pair?;
        adjacency
            .append(u, v)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    }
    if adjacency.edge_count() != edge_count {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "edge list changed between passes",
        ));
    }
    debug!("adjacency lists filled");

    Ok(RawEdges {
        node_count,
        edge_count,
        adjacency,
    })
}

/// Iterator over `(origin, destination)` pairs of an edge-list stream.
///
/// Ends at end-of-stream, or at the first unparseable token. A dangling
/// origin without a destination is dropped.
struct Pairs<R> {
    reader: R,
    line: Vec<u8>,
    pos: usize,
    done: bool,
}

impl<R: BufRead> Pairs<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            pos: 0,
            done: false,
        }
    }

    /// Byte range of the next whitespace-delimited token in `line`, reading
    /// further lines as needed. `Ok(None)` at end of stream.
    fn next_token(&mut self) -> io::Result<Option<Range<usize>>> {
        loop {
            while self.pos < self.line.len() && self.line[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos < self.line.len() {
                let start = self.pos;
                while self.pos < self.line.len() && !self.line[self.pos].is_ascii_whitespace() {
                    self.pos += 1;
                }
                return Ok(Some(start..self.pos));
            }

            self.line.clear();
            self.pos = 0;
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
        }
    }

    fn next_id(&mut self) -> io::Result<Option<NodeId>> {
        Ok(self
            .next_token()?
            .and_then(|range| parse_id(&self.line[range])))
    }

    fn next_pair(&mut self) -> io::Result<Option<(NodeId, NodeId)>> {
        let Some(origin) = self.next_id()? else {
            return Ok(None);
        };
        let Some(destination) = self.next_id()? else {
            return Ok(None);
        };
        Ok(Some((origin, destination)))
    }
}

impl<R: BufRead> Iterator for Pairs<R> {
    type Item = io::Result<(NodeId, NodeId)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_pair() {
            Ok(Some(pair)) => Some(Ok(pair)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn parse_id(token: &[u8]) -> Option<NodeId> {
    std::str::from_utf8(token).ok()?.parse().ok()
}
