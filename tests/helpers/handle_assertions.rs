//! Assertions over element handles.

use scopewalk::ide::{ElementHandle, ElementKind};

pub fn names(handles: &[ElementHandle]) -> Vec<&str> {
    handles.iter().map(|h| h.name()).collect()
}

/// `Kind:name@parent` for every handle, e.g. `Field:v@Derived`.
pub fn labels(handles: &[ElementHandle]) -> Vec<String> {
    handles
        .iter()
        .map(|h| {
            let parent = h.parent().map(|p| p.name()).unwrap_or_default();
            format!("{:?}:{}@{}", h.kind(), h.name(), parent)
        })
        .collect()
}

/// The single handle called `name`; fails if there are none or several.
pub fn single<'a>(handles: &'a [ElementHandle], name: &str) -> &'a ElementHandle {
    let found: Vec<_> = handles.iter().filter(|h| h.name() == name).collect();
    assert_eq!(found.len(), 1, "expected exactly one `{}` in {:?}", name, handles);
    found[0]
}

pub fn assert_absent(handles: &[ElementHandle], name: &str) {
    assert!(
        handles.iter().all(|h| h.name() != name),
        "`{}` should not be visible in {:?}",
        name,
        handles
    );
}

pub fn assert_kind(handle: &ElementHandle, kind: ElementKind) {
    assert_eq!(handle.kind(), kind, "unexpected kind for {:?}", handle);
}
