use std::fmt;

use crate::error;

pub type Res<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn next_value<T>(it: &mut std::slice::Iter<'_, std::string::String>, opt: &str) -> T
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let n = it
        .next()
        .unwrap_or_else(|| error_exit(format!("{}: value missing", opt)));
    n.parse()
        .unwrap_or_else(|e| error_exit(format!("{}: {} '{}'", opt, e, n)))
}

pub fn error_exit<T: fmt::Display, U>(t: T) -> U {
    error!("{}", t);
    std::process::exit(1);
}

// 値が重複する要素を取り除く (最初に出現した順序を維持)
pub fn vec_dedup<T: PartialEq>(v: Vec<T>) -> Vec<T> {
    let mut res: Vec<T> = vec![];
    for e in v {
        if !res.contains(&e) {
            res.push(e);
        }
    }
    res
}

// 最大値と等しい要素のindexを返却
pub fn max_indices<T: Ord + Copy>(v: &[T]) -> Vec<usize> {
    match v.iter().max() {
        Some(&max) => v
            .iter()
            .enumerate()
            .filter(|&(_, &x)| x == max)
            .map(|(i, _)| i)
            .collect(),
        None => vec![],
    }
}

#[test]
fn test_vec_dedup() {
    assert_eq!(vec_dedup(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
    assert_eq!(vec_dedup(Vec::<i32>::new()), Vec::<i32>::new());
}

#[test]
fn test_max_indices() {
    assert_eq!(max_indices(&[30000, 25000, 20000, 25000]), vec![0]);
    assert_eq!(max_indices(&[1, 5, 2, 5]), vec![1, 3]);
    assert_eq!(max_indices::<i32>(&[]), Vec::<usize>::new());
}
