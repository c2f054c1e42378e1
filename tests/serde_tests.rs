#![cfg(feature = "serde")]

use circular_buffer::CircularBuffer;

#[test]
fn serializes_as_a_plain_sequence() {
    let mut buffer = CircularBuffer::new();
    buffer.push_back(2);
    buffer.push_back(3);
    buffer.push_front(1);

    let json = serde_json::to_string(&buffer).unwrap();
    assert_eq!(json, "[1,2,3]");
    assert_eq!(json, serde_json::to_string(&buffer.to_vec()).unwrap());
}

#[test]
fn storage_layout_does_not_leak_into_encoding() {
    let straight: CircularBuffer<i32> = (0..3).collect();

    let mut rotated = CircularBuffer::new();
    for i in 0..20 {
        rotated.push_back(i);
    }
    for _ in 0..20 {
        rotated.pop_front();
    }
    rotated.extend(0..3);

    assert_eq!(
        serde_json::to_string(&rotated).unwrap(),
        serde_json::to_string(&straight).unwrap()
    );
}

#[test]
fn round_trips_through_json() {
    let mut buffer = CircularBuffer::new();
    buffer.extend(0..40u32);
    buffer.push_front(99);

    let json = serde_json::to_string(&buffer).unwrap();
    let decoded: CircularBuffer<u32> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, buffer);
    assert_eq!(decoded.to_vec(), buffer.to_vec());
}

#[test]
fn deserializes_an_empty_sequence() {
    let decoded: CircularBuffer<String> = serde_json::from_str("[]").unwrap();
    assert!(decoded.is_empty());
}
