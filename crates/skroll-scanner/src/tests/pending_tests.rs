use super::*;

#[test]
fn empty_queue_has_no_head() {
    let mut queue = PendingQueue::new();
    assert!(queue.is_empty());
    assert_eq!(queue.head(), None);
    assert_eq!(queue.pop_head(), None);
}

#[test]
fn drains_in_priority_order() {
    let mut queue = PendingQueue::new();
    queue.set_indent(6);
    queue.flag_error();
    queue.add_dedents(2);
    queue.add_newline();
    queue.add_newline();

    let mut drained = Vec::new();
    while let Some(owed) = queue.pop_head() {
        drained.push(owed);
    }
    assert_eq!(
        drained,
        vec![
            Owed::Newline,
            Owed::Newline,
            Owed::Dedent,
            Owed::Dedent,
            Owed::IndentationError,
            Owed::Indent(6),
        ]
    );
    assert!(queue.is_empty());
}

#[test]
fn head_does_not_consume() {
    let mut queue = PendingQueue::new();
    queue.add_dedents(1);
    assert_eq!(queue.head(), Some(Owed::Dedent));
    assert_eq!(queue.head(), Some(Owed::Dedent));
    assert_eq!(queue.dedents(), 1);
}

#[test]
fn newline_room_runs_out_at_the_count_limit() {
    let mut queue = PendingQueue::from_parts(u16::MAX - 1, 0, false, None);
    assert!(queue.has_newline_room());
    queue.add_newline();
    assert!(!queue.has_newline_room());
    assert_eq!(queue.newlines(), u16::MAX);
}

#[test]
fn owed_maps_to_tokens() {
    assert_eq!(Owed::Indent(3).token(), Token::Indent { width: 3 });
    assert_eq!(Owed::Dedent.token(), Token::Dedent);
    assert_eq!(Owed::Newline.token(), Token::Newline);
    assert_eq!(Owed::IndentationError.token(), Token::IndentationError);
}

#[test]
fn clear_forgets_everything() {
    let mut queue = PendingQueue::from_parts(3, 2, true, Some(4));
    queue.clear();
    assert!(queue.is_empty());
}
