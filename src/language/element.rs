use super::token::TokenId;

/// Common view of anything that sits in a table: the tokens it was built
/// from, in the order they belong on a line, and its trailing comment.
pub trait Element {
    fn tokens(&self) -> Vec<TokenId>;

    fn comment(&self) -> &[TokenId];

    fn comment_mut(&mut self) -> &mut Vec<TokenId>;
}

/// Which part of a declaration a token fills. Together with the kind of
/// declaration this decides both the parsing state and the token's tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Declaration,
    Name,
    Argument,
    Value,
    Alias,
    AliasValue,
    Unwanted,
}

pub(crate) fn move_up<T>(list: &mut [T], index: usize) -> bool {
    if index == 0 || index >= list.len() {
        return false;
    }
    list.swap(index - 1, index);
    true
}

pub(crate) fn move_down<T>(list: &mut [T], index: usize) -> bool {
    if index + 1 >= list.len() {
        return false;
    }
    list.swap(index, index + 1);
    true
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn moving_within_bounds() {
        let mut list = vec!['a', 'b', 'c'];

        assert!(move_up(&mut list, 2));
        assert_eq!(list, vec!['a', 'c', 'b']);

        assert!(!move_up(&mut list, 0));
        assert!(!move_down(&mut list, 2));
        assert!(!move_down(&mut list, 7));

        assert!(move_down(&mut list, 0));
        assert_eq!(list, vec!['c', 'a', 'b']);
    }
}
