//! Locating variables (`${...}`, `@{...}`, `&{...}`, `%{...}`) and item
//! access brackets inside the text of a single cell.

use serde::Serialize;

mod extractor;

pub use extractor::extract;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContainerKind {
    Scalar,
    List,
    Dictionary,
    Environment,
    Index,
    Mix,
}

impl ContainerKind {
    fn from_sigil(c: u8) -> Option<ContainerKind> {
        match c {
            b'$' => Some(ContainerKind::Scalar),
            b'@' => Some(ContainerKind::List),
            b'&' => Some(ContainerKind::Dictionary),
            b'%' => Some(ContainerKind::Environment),
            _ => None,
        }
    }

    pub fn sigil(self) -> Option<char> {
        match self {
            ContainerKind::Scalar => Some('$'),
            ContainerKind::List => Some('@'),
            ContainerKind::Dictionary => Some('&'),
            ContainerKind::Environment => Some('%'),
            ContainerKind::Index | ContainerKind::Mix => None,
        }
    }

    fn closer(self) -> Option<u8> {
        match self {
            ContainerKind::Index => Some(b']'),
            ContainerKind::Mix => None,
            _ => Some(b'}'),
        }
    }

    pub fn is_variable(self) -> bool {
        self.sigil()
            .is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ContainerId(usize);

/// Byte range within the analysed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Part {
    Text(Span),
    Container(ContainerId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
    pub kind: ContainerKind,
    /// offset of the sigil, or of the `[` for an index
    pub start: usize,
    /// offset just past the closing bracket, or where the container was
    /// abandoned if it never closed
    pub end: usize,
    pub closed: bool,
    pub parent: Option<ContainerId>,
    pub parts: Vec<Part>,
}

/// A container left open when its text (or its enclosing container) ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketWarning {
    pub container: ContainerId,
    pub offset: usize,
    pub expected: char,
}

/// Result of extract(). Containers live in an arena; the root is always a
/// Mix container spanning the whole text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableStructure {
    text: String,
    containers: Vec<Container>,
    warnings: Vec<BracketWarning>,
}

impl VariableStructure {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> ContainerId {
        ContainerId(0)
    }

    pub fn container(&self, id: ContainerId) -> &Container {
        &self.containers[id.0]
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn warnings(&self) -> &[BracketWarning] {
        &self.warnings
    }

    pub fn children(&self, id: ContainerId) -> impl Iterator<Item = ContainerId> + '_ {
        self.containers[id.0]
            .parts
            .iter()
            .filter_map(|part| match part {
                Part::Container(child) => Some(*child),
                Part::Text(_) => None,
            })
    }

    /// Variables at the top level of the text, in order.
    pub fn variables(&self) -> Vec<ContainerId> {
        self.children(self.root())
            .filter(|id| {
                self.container(*id)
                    .kind
                    .is_variable()
            })
            .collect()
    }

    pub fn depth(&self, id: ContainerId) -> usize {
        let mut depth = 0;
        let mut current = self.container(id);
        while let Some(parent) = current.parent {
            depth += 1;
            current = self.container(parent);
        }
        depth
    }

    pub fn span(&self, id: ContainerId) -> Span {
        let container = self.container(id);
        Span {
            start: container.start,
            end: container.end,
        }
    }

    /// The text between the brackets of a container.
    pub fn name(&self, id: ContainerId) -> &str {
        let container = self.container(id);
        let start = match container.kind {
            ContainerKind::Mix => container.start,
            ContainerKind::Index => container.start + 1,
            _ => container.start + 2,
        };
        let end = if container.closed && container.kind != ContainerKind::Mix {
            container.end - 1
        } else {
            container.end
        };
        if start <= end {
            &self.text[start..end]
        } else {
            ""
        }
    }

    /// If the whole text is exactly one closed variable, that variable.
    pub fn single_variable(&self) -> Option<ContainerId> {
        let parts = &self.container(self.root()).parts;
        match parts.as_slice() {
            [Part::Container(id)] => {
                let container = self.container(*id);
                if container.closed && container.kind.is_variable() {
                    Some(*id)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub fn is_single_variable(&self) -> bool {
        self.single_variable()
            .is_some()
    }

    pub fn has_variables(&self) -> bool {
        self.containers
            .iter()
            .any(|container| {
                container
                    .kind
                    .is_variable()
            })
    }

    /// Offset of the first occurrence of a character in top level text,
    /// skipping escaped occurrences and anything inside a container.
    pub fn first_unescaped_outside(&self, wanted: char) -> Option<usize> {
        for part in &self.container(self.root()).parts {
            if let Part::Text(span) = part {
                let mut backslashes = 0;
                for (i, c) in self.text[span.start..span.end].char_indices() {
                    if c == wanted && backslashes % 2 == 0 {
                        return Some(span.start + i);
                    }
                    if c == '\\' {
                        backslashes += 1;
                    } else {
                        backslashes = 0;
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn plain_text_is_one_run() {
        let structure = extract("just some text");
        let root = structure.container(structure.root());

        assert_eq!(root.kind, ContainerKind::Mix);
        assert_eq!(root.parts, vec![Part::Text(Span { start: 0, end: 14 })]);
        assert!(!structure.has_variables());
        assert!(structure
            .warnings()
            .is_empty());
    }

    #[test]
    fn nested_variable() {
        let structure = extract("${x${y}}");

        let outer = structure
            .single_variable()
            .unwrap();
        assert_eq!(structure.container(outer).kind, ContainerKind::Scalar);
        assert_eq!(structure.span(outer), Span { start: 0, end: 8 });

        let inner: Vec<_> = structure
            .children(outer)
            .collect();
        assert_eq!(inner.len(), 1);
        assert_eq!(structure.container(inner[0]).parent, Some(outer));
        assert_eq!(structure.span(inner[0]), Span { start: 3, end: 7 });
        assert_eq!(structure.name(inner[0]), "y");
        assert_eq!(structure.depth(inner[0]), 2);
        assert!(structure
            .warnings()
            .is_empty());
    }

    #[test]
    fn environment_variable() {
        let structure = extract("%{env}");

        let id = structure
            .single_variable()
            .unwrap();
        let container = structure.container(id);
        assert_eq!(container.kind, ContainerKind::Environment);
        assert!(container.closed);
        assert_eq!(structure.name(id), "env");
        assert!(structure
            .warnings()
            .is_empty());
    }

    #[test]
    fn unmatched_bracket() {
        let structure = extract("${x");

        let variables = structure.variables();
        assert_eq!(variables.len(), 1);

        let container = structure.container(variables[0]);
        assert!(!container.closed);
        assert_eq!(container.end, 3);
        assert_eq!(structure.name(variables[0]), "x");
        assert_eq!(
            structure.warnings(),
            &[BracketWarning {
                container: variables[0],
                offset: 0,
                expected: '}'
            }]
        );
        assert_eq!(structure.single_variable(), None);
    }

    #[test]
    fn escaped_opener() {
        let structure = extract("\\${x}");
        assert!(!structure.has_variables());

        // an even number of backslashes escapes only themselves
        let structure = extract("\\\\${x}");
        assert_eq!(
            structure
                .variables()
                .len(),
            1
        );
    }

    #[test]
    fn item_access() {
        let structure = extract("${list}[0] and @{other}");

        let top: Vec<_> = structure
            .children(structure.root())
            .collect();
        assert_eq!(top.len(), 3);
        assert_eq!(structure.container(top[1]).kind, ContainerKind::Index);
        assert_eq!(structure.name(top[1]), "0");
        assert_eq!(structure.container(top[2]).kind, ContainerKind::List);

        // not directly after a variable, so just text
        let structure = extract("[Documentation]");
        assert!(structure
            .children(structure.root())
            .next()
            .is_none());
    }

    #[test]
    fn closing_outer_closes_inner() {
        let structure = extract("${a${b}");

        // the only `}` closes the inner ${b}; the outer is left open
        let outer = structure.variables()[0];
        assert!(!structure
            .container(outer)
            .closed);
        assert_eq!(
            structure
                .warnings()
                .len(),
            1
        );

        let structure = extract("${a[1}");
        let outer = structure.variables()[0];
        assert!(structure
            .container(outer)
            .closed);
    }

    #[test]
    fn splitting_character_outside_variables() {
        let structure = extract("${a=b}=value");
        assert_eq!(structure.first_unescaped_outside('='), Some(6));

        let structure = extract("a\\=b=c");
        assert_eq!(structure.first_unescaped_outside('='), Some(4));

        let structure = extract("novalue");
        assert_eq!(structure.first_unescaped_outside('='), None);
    }
}
