//! Random operation sequences checked against `VecDeque` / `Vec`.

use std::collections::{HashSet, VecDeque};

use fixed_collections::{CollectionError, DynamicList, StaticArray, StaticList};
use proptest::prelude::*;

const CAP: usize = 8;

#[derive(Debug, Clone)]
enum ListOp {
    AddFront(u8),
    AddBack(u8),
    PopFront,
    PopBack,
    SearchRemove(u8),
    Empty,
}

#[derive(Debug, Clone)]
enum ArrayOp {
    Add(usize, u8),
    Remove(usize),
    RemoveRange(usize, usize),
    SearchRemove(u8),
    Append(usize, Vec<u8>),
}

fn list_op() -> impl Strategy<Value = ListOp> {
    prop_oneof![
        4 => any::<u8>().prop_map(|v| ListOp::AddFront(v % 16)),
        4 => any::<u8>().prop_map(|v| ListOp::AddBack(v % 16)),
        2 => Just(ListOp::PopFront),
        2 => Just(ListOp::PopBack),
        2 => any::<u8>().prop_map(|v| ListOp::SearchRemove(v % 16)),
        1 => Just(ListOp::Empty),
    ]
}

fn array_op() -> impl Strategy<Value = ArrayOp> {
    prop_oneof![
        4 => (0..CAP + 2, any::<u8>()).prop_map(|(i, v)| ArrayOp::Add(i, v % 16)),
        2 => (0..CAP + 2).prop_map(ArrayOp::Remove),
        1 => (0..CAP + 2, 0..CAP + 2).prop_map(|(a, b)| ArrayOp::RemoveRange(a, b)),
        2 => any::<u8>().prop_map(|v| ArrayOp::SearchRemove(v % 16)),
        1 => (0..CAP + 2, proptest::collection::vec(any::<u8>(), 0..4))
            .prop_map(|(i, vs)| ArrayOp::Append(i, vs)),
    ]
}

fn model_add(model: &mut VecDeque<u8>, front: bool, v: u8) -> Result<(), CollectionError> {
    if model.len() == CAP {
        return Err(CollectionError::CapacityExceeded { capacity: CAP });
    }
    if front {
        model.push_front(v);
    } else {
        model.push_back(v);
    }
    Ok(())
}

proptest! {
    #[test]
    fn static_list_matches_vecdeque(ops in proptest::collection::vec(list_op(), 0..200)) {
        let _ = env_logger::try_init();
        let mut list: StaticList<u8, CAP, u8> = StaticList::new();
        let mut model: VecDeque<u8> = VecDeque::new();

        for op in ops {
            match op {
                ListOp::AddFront(v) => prop_assert_eq!(list.add_front(v), model_add(&mut model, true, v)),
                ListOp::AddBack(v) => prop_assert_eq!(list.add_back(v), model_add(&mut model, false, v)),
                ListOp::PopFront => prop_assert_eq!(list.pop_front().ok(), model.pop_front()),
                ListOp::PopBack => prop_assert_eq!(list.pop_back().ok(), model.pop_back()),
                ListOp::SearchRemove(v) => {
                    let expected = model.iter().position(|x| *x == v).map(|i| model.remove(i)).is_some();
                    prop_assert_eq!(list.search_remove(&v), expected);
                }
                ListOp::Empty => {
                    list.empty();
                    model.clear();
                }
            }
            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.live_slots(), model.len());
            let free: Vec<usize> = list.free_chain().collect();
            prop_assert_eq!(free.len(), CAP - model.len());
            prop_assert_eq!(free.iter().collect::<HashSet<_>>().len(), free.len());
            prop_assert!(list.iter().eq(model.iter()));
            prop_assert!(list.iter().rev().eq(model.iter().rev()));
        }
    }

    #[test]
    fn dynamic_list_never_exceeds_limit(values in proptest::collection::vec(any::<u16>(), 0..64), limit in 1usize..32) {
        let mut list: DynamicList<u16> = DynamicList::with_max_capacity(limit);
        for v in &values {
            let _ = list.add_back(*v);
        }
        prop_assert_eq!(list.len(), values.len().min(limit));
        prop_assert!(list.capacity() <= limit);
        prop_assert!(list.iter().eq(values.iter().take(limit)));
    }

    #[test]
    fn static_array_matches_vec(ops in proptest::collection::vec(array_op(), 0..200)) {
        let _ = env_logger::try_init();
        let mut arr: StaticArray<u8, CAP> = StaticArray::new();
        let mut model: Vec<u8> = Vec::new();

        for op in ops {
            match op {
                ArrayOp::Add(i, v) => {
                    let ok = model.len() < CAP && i <= model.len();
                    prop_assert_eq!(arr.add(i, v).is_ok(), ok);
                    if ok {
                        model.insert(i, v);
                    }
                }
                ArrayOp::Remove(i) => {
                    let expected = (i < model.len()).then(|| model.remove(i));
                    prop_assert_eq!(arr.remove(i).ok(), expected);
                }
                ArrayOp::RemoveRange(from, to) => {
                    let ok = from <= to && to < model.len();
                    prop_assert_eq!(arr.remove_range(from, to).is_ok(), ok);
                    if ok {
                        model.drain(from..=to);
                    }
                }
                ArrayOp::SearchRemove(v) => {
                    let expected = model.iter().position(|x| *x == v).map(|i| model.remove(i)).is_some();
                    prop_assert_eq!(arr.search_remove(&v), expected);
                }
                ArrayOp::Append(i, values) => {
                    let ok = model.len() + values.len() <= CAP && i <= model.len();
                    prop_assert_eq!(arr.append(i, &values).is_ok(), ok);
                    if ok {
                        model.splice(i..i, values);
                    }
                }
            }
            prop_assert!(arr.len() <= CAP);
            prop_assert_eq!(arr.as_slice(), model.as_slice());
        }
    }
}
