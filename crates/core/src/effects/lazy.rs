use folio_protocol::{DomPatch, Target};

/// Swap image `index` to its deferred source, if it has one.
pub fn load_image(index: usize, data_src: Option<&str>) -> Option<DomPatch> {
    let src = data_src.filter(|s| !s.is_empty())?;
    Some(DomPatch::attribute(Target::Image(index), "src", src))
}
