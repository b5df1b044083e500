use core::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Serialize,
    de::{self, DeserializeSeed, Visitor},
};

use crate::{AllocVec, Error, alloc::Allocator};

impl<T: Serialize, A: Allocator> Serialize for AllocVec<T, A> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        <[T]>::serialize(self, serializer)
    }
}

const AN_ARRAY: &str = "an array";

fn map_error<E: de::Error>(result: Result<(), Error>) -> Result<(), E> {
    match result {
        Ok(()) => Ok(()),
        Err(error) => Err(E::custom(error)),
    }
}

/// Appends the elements of a sequence to the vector.
impl<'de, T: Deserialize<'de>, A: Allocator> DeserializeSeed<'de> for &'_ mut AllocVec<T, A> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, T: Deserialize<'de>, A: Allocator> Visitor<'de> for &'_ mut AllocVec<T, A> {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(AN_ARRAY)
    }

    fn visit_seq<Seq>(self, mut seq: Seq) -> Result<Self::Value, Seq::Error>
    where
        Seq: serde::de::SeqAccess<'de>,
    {
        if let Some(size_hint) = seq.size_hint() {
            map_error(self.try_reserve(size_hint))?;
        }

        while let Some(elem) = seq.next_element()? {
            map_error(self.try_push(elem))?;
        }

        Ok(())
    }
}

impl<'de, T: Deserialize<'de>, A: Allocator + Default> Deserialize<'de> for AllocVec<T, A> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct AllocVecVisitor<T, A>(PhantomData<(T, A)>);

        impl<'de, T: Deserialize<'de>, A: Allocator + Default> Visitor<'de> for AllocVecVisitor<T, A> {
            type Value = AllocVec<T, A>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(AN_ARRAY)
            }

            fn visit_seq<Seq>(self, seq: Seq) -> Result<Self::Value, Seq::Error>
            where
                Seq: serde::de::SeqAccess<'de>,
            {
                let mut vec = AllocVec::new_in(A::default());
                (&mut vec).visit_seq(seq)?;
                Ok(vec)
            }
        }

        deserializer.deserialize_seq(AllocVecVisitor(PhantomData))
    }
}
