//! Single pass scanner building the container tree for one cell of text.

use tracing::debug;

use super::{BracketWarning, Container, ContainerId, ContainerKind, Part, Span, VariableStructure};

struct Extractor<'i> {
    text: &'i str,
    containers: Vec<Container>,
    stack: Vec<ContainerId>,
    warnings: Vec<BracketWarning>,
    pending: Option<usize>,
}

impl<'i> Extractor<'i> {
    fn new(text: &'i str) -> Extractor<'i> {
        let root = Container {
            kind: ContainerKind::Mix,
            start: 0,
            end: text.len(),
            closed: true,
            parent: None,
            parts: Vec::new(),
        };

        Extractor {
            text,
            containers: vec![root],
            stack: vec![ContainerId(0)],
            warnings: Vec::new(),
            pending: None,
        }
    }

    fn current(&self) -> ContainerId {
        match self
            .stack
            .last()
        {
            Some(id) => *id,
            None => ContainerId(0),
        }
    }

    /// Attach any run of plain text that ends at offset to the container
    /// currently open.
    fn flush(&mut self, offset: usize) {
        if let Some(start) = self
            .pending
            .take()
        {
            if start < offset {
                let id = self.current();
                self.containers[id.0]
                    .parts
                    .push(Part::Text(Span { start, end: offset }));
            }
        }
    }

    fn open(&mut self, kind: ContainerKind, offset: usize) {
        self.flush(offset);

        let parent = self.current();
        let id = ContainerId(
            self.containers
                .len(),
        );
        self.containers
            .push(Container {
                kind,
                start: offset,
                end: offset,
                closed: false,
                parent: Some(parent),
                parts: Vec::new(),
            });
        self.containers[parent.0]
            .parts
            .push(Part::Container(id));
        self.stack
            .push(id);
    }

    /// Find the innermost open container that the given bracket closes.
    fn nearest(&self, closer: u8) -> Option<usize> {
        self.stack
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .find(|(_, id)| {
                self.containers[id.0]
                    .kind
                    .closer()
                    == Some(closer)
            })
            .map(|(depth, _)| depth)
    }

    /// Close the container at the given stack depth, and with it everything
    /// opened inside it that is still open.
    fn close(&mut self, depth: usize, end: usize) {
        self.flush(end - 1);

        while self
            .stack
            .len()
            > depth + 1
        {
            if let Some(inner) = self
                .stack
                .pop()
            {
                self.abandon(inner, end - 1);
            }
        }

        if let Some(id) = self
            .stack
            .pop()
        {
            let container = &mut self.containers[id.0];
            container.end = end;
            container.closed = true;
        }
    }

    /// Close a container that never saw its bracket; it extends to wherever
    /// its enclosing container stopped.
    fn abandon(&mut self, id: ContainerId, end: usize) {
        let container = &mut self.containers[id.0];
        container.end = end;
        container.closed = false;

        let expected = match container
            .kind
            .closer()
        {
            Some(closer) => closer as char,
            None => '}',
        };

        self.warnings
            .push(BracketWarning {
                container: id,
                offset: container.start,
                expected,
            });
    }

    /// Whether the last thing in the current container is a variable (or an
    /// index on one) ending exactly here, making a `[` an item access.
    fn follows_variable(&self, offset: usize) -> bool {
        let current = self.current();
        if self
            .pending
            .is_some()
        {
            return false;
        }
        match self.containers[current.0]
            .parts
            .last()
        {
            Some(Part::Container(id)) => {
                let previous = &self.containers[id.0];
                previous.closed && previous.end == offset && previous.kind != ContainerKind::Mix
            }
            _ => false,
        }
    }

    fn run(mut self) -> VariableStructure {
        let bytes = self
            .text
            .as_bytes();
        let mut backslashes = 0;
        let mut i = 0;

        while i < bytes.len() {
            let c = bytes[i];
            let escaped = backslashes % 2 == 1;

            if !escaped {
                if let Some(kind) = ContainerKind::from_sigil(c) {
                    if bytes.get(i + 1) == Some(&b'{') {
                        self.open(kind, i);
                        backslashes = 0;
                        i += 2;
                        continue;
                    }
                }

                if c == b'[' && self.follows_variable(i) {
                    self.open(ContainerKind::Index, i);
                    backslashes = 0;
                    i += 1;
                    continue;
                }

                if c == b'}' || c == b']' {
                    if let Some(depth) = self.nearest(c) {
                        self.close(depth, i + 1);
                        backslashes = 0;
                        i += 1;
                        continue;
                    }
                }
            }

            if self
                .pending
                .is_none()
            {
                self.pending = Some(i);
            }

            if c == b'\\' {
                backslashes += 1;
            } else {
                backslashes = 0;
            }
            i += 1;
        }

        let end = self
            .text
            .len();
        self.flush(end);

        while self
            .stack
            .len()
            > 1
        {
            if let Some(id) = self
                .stack
                .pop()
            {
                self.abandon(id, end);
            }
        }

        if !self
            .warnings
            .is_empty()
        {
            debug!(
                "{} unclosed container{} in {:?}",
                self.warnings
                    .len(),
                if self
                    .warnings
                    .len()
                    == 1
                {
                    ""
                } else {
                    "s"
                },
                self.text
            );
        }

        VariableStructure {
            text: self
                .text
                .to_string(),
            containers: self.containers,
            warnings: self.warnings,
        }
    }
}

/// Build the container tree for a piece of cell text.
pub fn extract(text: &str) -> VariableStructure {
    Extractor::new(text).run()
}
