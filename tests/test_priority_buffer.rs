use proptest::prelude::*;
use rask_buffer::{Buffer, BufferError, PriorityBuffer};

fn drain<T>(buffer: &mut PriorityBuffer<T>) -> Vec<T> {
    let mut out = Vec::new();
    while let Ok(item) = buffer.remove() {
        out.push(item);
    }
    out
}

#[test]
fn test_ascending_drains_smallest_first() {
    let mut buffer = PriorityBuffer::new();
    buffer.add_all(vec![5, 1, 4, 1, 9, 2, 6]).unwrap();
    assert_eq!(buffer.get(), Ok(&1));
    assert_eq!(drain(&mut buffer), vec![1, 1, 2, 4, 5, 6, 9]);
}

#[test]
fn test_descending_drains_largest_first() {
    let mut buffer = PriorityBuffer::with_order(false);
    assert!(!buffer.is_ascending());
    buffer.add_all(vec![5, 1, 4, 9, 2]).unwrap();
    assert_eq!(drain(&mut buffer), vec![9, 5, 4, 2, 1]);
}

#[test]
fn test_empty_priority_buffer_underflows() {
    let mut buffer: PriorityBuffer<u8> = PriorityBuffer::new();
    assert!(buffer.get().unwrap_err().is_underflow());
    assert!(buffer.remove().unwrap_err().is_underflow());
}

#[test]
fn test_zero_capacity_is_invalid() {
    assert_eq!(
        PriorityBuffer::<u8>::with_capacity(0, true).unwrap_err(),
        BufferError::InvalidCapacity { capacity: 0 }
    );
}

#[test]
fn test_custom_comparator() {
    let mut buffer = PriorityBuffer::<(u8, &'static str)>::with_comparator(true, |a, b| {
        a.1.len().cmp(&b.1.len())
    });
    buffer.add_all(vec![(1, "ccc"), (2, "a"), (3, "bb")]).unwrap();
    assert_eq!(buffer.remove(), Ok((2, "a")));
    assert_eq!(buffer.remove(), Ok((3, "bb")));
}

#[test]
fn test_remove_item_and_retain() {
    let mut buffer = PriorityBuffer::from_vec((0..20).collect(), true);
    assert!(buffer.remove_item(&7));
    assert!(!buffer.remove_item(&7));
    buffer.retain(|item| item % 2 == 0);
    assert!(!buffer.contains(&3));
    assert_eq!(buffer.into_sorted_vec(), (0..20).step_by(2).collect::<Vec<_>>());
}

#[derive(Debug, Clone)]
enum Op {
    Add(i32),
    Remove,
    RemoveItem(i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-50i32..50).prop_map(Op::Add),
        1 => Just(Op::Remove),
        1 => (-50i32..50).prop_map(Op::RemoveItem),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_priority_order_matches_sorted_model(
        ops in prop::collection::vec(op_strategy(), 0..200),
        ascending in any::<bool>(),
    ) {
        let mut buffer = PriorityBuffer::with_order(ascending);
        let mut model: Vec<i32> = Vec::new();
        let next = |model: &Vec<i32>| {
            if ascending { model.iter().min().copied() } else { model.iter().max().copied() }
        };

        for op in ops {
            match op {
                Op::Add(value) => {
                    buffer.add(value).unwrap();
                    model.push(value);
                }
                Op::Remove => {
                    let expected = next(&model);
                    match expected {
                        Some(value) => {
                            prop_assert_eq!(buffer.remove(), Ok(value));
                            let position = model.iter().position(|v| *v == value).unwrap();
                            model.swap_remove(position);
                        }
                        None => prop_assert!(buffer.remove().is_err()),
                    }
                }
                Op::RemoveItem(value) => {
                    let position = model.iter().position(|v| *v == value);
                    prop_assert_eq!(buffer.remove_item(&value), position.is_some());
                    if let Some(position) = position {
                        model.swap_remove(position);
                    }
                }
            }
            prop_assert_eq!(buffer.len(), model.len());
            prop_assert_eq!(buffer.get().ok().copied(), next(&model));
        }
    }
}
