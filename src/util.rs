/// Iterator over the 1, 2 or 3 planes of a format without boxing or allocating
pub(crate) enum ArrayIter<T> {
    Packed(std::array::IntoIter<T, 1>),
    SemiPlanar(std::array::IntoIter<T, 2>),
    Planar(std::array::IntoIter<T, 3>),
}

impl<T> From<[T; 1]> for ArrayIter<T> {
    fn from(value: [T; 1]) -> Self {
        Self::Packed(value.into_iter())
    }
}

impl<T> From<[T; 2]> for ArrayIter<T> {
    fn from(value: [T; 2]) -> Self {
        Self::SemiPlanar(value.into_iter())
    }
}

impl<T> From<[T; 3]> for ArrayIter<T> {
    fn from(value: [T; 3]) -> Self {
        Self::Planar(value.into_iter())
    }
}

impl<S> Iterator for ArrayIter<S> {
    type Item = S;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ArrayIter::Packed(iter) => iter.next(),
            ArrayIter::SemiPlanar(iter) => iter.next(),
            ArrayIter::Planar(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            ArrayIter::Packed(iter) => iter.size_hint(),
            ArrayIter::SemiPlanar(iter) => iter.size_hint(),
            ArrayIter::Planar(iter) => iter.size_hint(),
        }
    }
}
