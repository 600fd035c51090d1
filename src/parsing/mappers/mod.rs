//! Mappers decide what a token is, given where the parser is. Each table has
//! an ordered list of them; the first one that accepts a token tags it, adds
//! it to the model, and pushes the state it leaves the parser in.

use tracing::debug;

use crate::language::{DefinitionKind, Problem, RobotFile, RobotVersion, Token, TokenId};
use crate::parsing::scope::{ParsingStack, ParsingState};

mod cases;
mod comments;
mod settings;
mod variables;

pub trait Mapper {
    /// Whether this mapper takes part when parsing for the given version.
    fn applicable(&self, _version: &RobotVersion) -> bool {
        true
    }

    /// What the mapper recognizes. Unique within a table for any version.
    fn role(&self) -> &'static str;

    fn can_map(&self, stack: &ParsingStack, file: &RobotFile, token: &Token) -> bool;

    fn map(&self, stack: &mut ParsingStack, file: &mut RobotFile, id: TokenId);
}

pub(crate) type StaticMapper = &'static (dyn Mapper + Sync);

/// Versions a mapper is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Versions {
    All,
    Before(RobotVersion),
    From(RobotVersion),
}

impl Versions {
    pub(crate) fn contain(self, version: &RobotVersion) -> bool {
        match self {
            Versions::All => true,
            Versions::Before(limit) => version.is_older_than(&limit),
            Versions::From(limit) => version.is_newer_or_equal(&limit),
        }
    }
}

/// The version from which the older spellings of declarations are
/// reported as deprecated.
pub(crate) const DEPRECATION: RobotVersion = RobotVersion::new(3, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Settings,
    Variables,
    TestCases,
    Keywords,
}

impl TableKind {
    pub fn of(state: ParsingState) -> Option<TableKind> {
        match state {
            ParsingState::SettingTable => Some(TableKind::Settings),
            ParsingState::VariableTable => Some(TableKind::Variables),
            ParsingState::TestCaseTable => Some(TableKind::TestCases),
            ParsingState::KeywordTable => Some(TableKind::Keywords),
            _ => None,
        }
    }
}

/// The test case or keyword table the stack is in.
pub(crate) fn definition_kind(stack: &ParsingStack) -> Option<DefinitionKind> {
    match stack.table()? {
        ParsingState::TestCaseTable => Some(DefinitionKind::TestCase),
        ParsingState::KeywordTable => Some(DefinitionKind::Keyword),
        _ => None,
    }
}

pub(crate) fn declaration_state(kind: DefinitionKind) -> ParsingState {
    match kind {
        DefinitionKind::TestCase => ParsingState::TestCaseDeclaration,
        DefinitionKind::Keyword => ParsingState::KeywordDeclaration,
    }
}

/// A mapper found no element to attach its token to. The stack said there
/// would be one, so this is a bug rather than bad input.
pub(crate) fn lost(file: &mut RobotFile, id: TokenId, role: &str) {
    debug!("{} found nothing to attach to", role);
    file.unclaimed
        .push(id);
    let position = file
        .token(id)
        .position();
    file.report(Problem::IllegalParserState(role.to_string()), position);
}

/// Mappers for each table, resolved once for the version being parsed.
pub struct MapperRegistry {
    settings: Vec<StaticMapper>,
    variables: Vec<StaticMapper>,
    test_cases: Vec<StaticMapper>,
    keywords: Vec<StaticMapper>,
}

impl MapperRegistry {
    pub fn for_version(version: &RobotVersion) -> MapperRegistry {
        MapperRegistry {
            settings: select(settings::MAPPERS, version),
            variables: select(variables::MAPPERS, version),
            test_cases: select(cases::TEST_CASE_MAPPERS, version),
            keywords: select(cases::KEYWORD_MAPPERS, version),
        }
    }

    pub fn mappers(&self, table: TableKind) -> &[StaticMapper] {
        match table {
            TableKind::Settings => &self.settings,
            TableKind::Variables => &self.variables,
            TableKind::TestCases => &self.test_cases,
            TableKind::Keywords => &self.keywords,
        }
    }

    /// The first mapper of the table willing to take the token.
    pub fn find(
        &self,
        table: TableKind,
        stack: &ParsingStack,
        file: &RobotFile,
        id: TokenId,
    ) -> Option<StaticMapper> {
        let token = file.token(id);
        self.mappers(table)
            .iter()
            .find(|mapper| mapper.can_map(stack, file, token))
            .copied()
    }
}

fn select(candidates: &[StaticMapper], version: &RobotVersion) -> Vec<StaticMapper> {
    let selected: Vec<StaticMapper> = candidates
        .iter()
        .filter(|mapper| mapper.applicable(version))
        .copied()
        .collect();

    debug_assert!(
        {
            let mut roles: Vec<&str> = selected
                .iter()
                .map(|mapper| mapper.role())
                .collect();
            roles.sort();
            let total = roles.len();
            roles.dedup();
            roles.len() == total
        },
        "mapper role registered twice for version {}",
        version
    );

    selected
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn roles_unique_for_every_version() {
        // MapperRegistry::for_version() asserts this itself in debug builds
        for version in [
            RobotVersion::new(2, 9),
            RobotVersion::new(3, 0),
            RobotVersion::new(3, 1),
            RobotVersion::with_patch(3, 1, 2),
        ] {
            let registry = MapperRegistry::for_version(&version);
            assert!(!registry
                .mappers(TableKind::Settings)
                .is_empty());
        }
    }

    #[test]
    fn legacy_mappers_only_before_three() {
        let old = MapperRegistry::for_version(&RobotVersion::new(2, 9));
        let new = MapperRegistry::for_version(&RobotVersion::new(3, 1));

        let roles = |registry: &MapperRegistry| -> Vec<&'static str> {
            registry
                .mappers(TableKind::Settings)
                .iter()
                .map(|mapper| mapper.role())
                .collect()
        };

        assert!(roles(&old).contains(&"test setup unwanted argument"));
        assert!(!roles(&new).contains(&"test setup unwanted argument"));
        assert!(roles(&new).contains(&"test setup keyword name"));
    }

    #[test]
    fn every_table_starts_with_comments() {
        let registry = MapperRegistry::for_version(&RobotVersion::default());
        for table in [
            TableKind::Settings,
            TableKind::Variables,
            TableKind::TestCases,
            TableKind::Keywords,
        ] {
            assert_eq!(registry.mappers(table)[0].role(), "comment");
        }
    }
}
