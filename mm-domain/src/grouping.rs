use std::collections::HashMap;
use std::hash::Hash;

/// Groups `items` by `key_fn`, keeping the groups in the order their key was first seen
/// and the items of each group in input order.
pub fn group_by_first_seen<T, K, F>(items: impl IntoIterator<Item = T>, key_fn: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index_by_key: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let key = key_fn(&item);
        match index_by_key.get(&key) {
            Some(&idx) => groups[idx].1.push(item),
            None => {
                index_by_key.insert(key.clone(), groups.len());
                groups.push((key, vec![item]));
            }
        }
    }

    groups
}
