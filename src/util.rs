use serde::Serialize;
pub use uom::si::information::byte;

pub type Information = uom::si::u64::Information;

/// How many bytes does a value take up on the wire?
pub trait DataSized {
    fn size(&self) -> Information;
}

// Sizes are measured on the JSON encoding, which is what we'd ship to a verifier.
impl<T: Serialize> DataSized for T {
    fn size(&self) -> Information {
        Information::new::<byte>(
            serde_json::to_string(self)
                .expect("serialization should work")
                .len()
                .try_into()
                .expect("not that big"),
        )
    }
}
