/// Endless reader over a preloaded, non-empty sequence. Once the last element
/// is read, reading starts over from the first one.
#[derive(Clone, Debug)]
pub struct CircularReader<T: Clone> {
    buffer: Vec<T>,
    index: usize,
}

impl<T: Clone> CircularReader<T> {
    /// Creates a new CircularReader with preloaded data.
    pub fn new(data: Vec<T>) -> Result<Self, &'static str> {
        if data.is_empty() {
            return Err("Buffer cannot be empty");
        }
        Ok(Self {
            buffer: data,
            index: 0,
        })
    }

    /// Reads the next element, moving the index forward cyclically.
    pub fn next_element(&mut self) -> T {
        let elem = self.buffer[self.index].clone();
        self.index = (self.index + 1) % self.buffer.len();
        elem
    }

    /// Number of preloaded elements in one cycle.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl<T: Clone> TryFrom<Vec<T>> for CircularReader<T> {
    type Error = String;
    fn try_from(value: Vec<T>) -> Result<Self, Self::Error> {
        Self::new(value).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_around() {
        let data = vec![10, 20, 30, 40];
        let mut reader = CircularReader::new(data.clone()).unwrap();

        for i in 0..10 {
            assert_eq!(reader.next_element(), data[i % data.len()]);
        }
        assert_eq!(reader.len(), 4);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(CircularReader::<i32>::new(vec![]).is_err());
        assert!(CircularReader::<i32>::try_from(vec![]).is_err());
    }
}
