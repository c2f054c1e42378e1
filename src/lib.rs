//! A double-ended queue backed by a growable circular buffer.
//!
//! This queue has `O(1)` amortized inserts and removals from both ends of the
//! container. It also has `O(1)` indexing like a vector. The contained
//! elements are not required to be copyable, and the buffer grows by doubling
//! whenever it runs out of room, so pushes never fail.
//!
//! The storage length is always a power of two, which lets every index wrap
//! into range with a single bitwise AND instead of a modulo.
//!
//! # Feature Flags
//! The **circular-buffer** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd (the crate itself only needs `alloc`)
//!
//!
//! - `serde`
//!   - Optional
//!   - Serialize and deserialize the buffer as a front-to-back sequence
//!
//! # Usage
//!
//! First, add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! circular-buffer = "0.1"
//! ```
//!
//! If you would instead like to use it in a `#![no_std]` situation or crate,
//! you can request this via:
//!
//! ```toml
//! [dependencies]
//! circular-buffer = { version = "0.1", default-features = false }
//! ```
//!
//! # Examples
//! ```
//! use circular_buffer::CircularBuffer;
//!
//! let mut buffer = CircularBuffer::new();
//! assert_eq!(buffer.len(), 0);
//!
//! buffer.push_back(1);
//! buffer.push_back(2);
//! assert_eq!(buffer.len(), 2);
//!
//! assert_eq!(buffer.pop_front(), Some(1));
//! assert_eq!(buffer.pop_front(), Some(2));
//! assert_eq!(buffer.pop_front(), None);
//! ```
//!
//! # Both ends
//! ```
//! use circular_buffer::CircularBuffer;
//!
//! let mut buffer = CircularBuffer::new();
//!
//! buffer.push_back(1);
//! buffer.push_back(2);
//! buffer.push_front(0);
//!
//! assert_eq!(buffer.to_vec(), vec![0, 1, 2]);
//! assert_eq!(buffer.pop_back(), Some(2));
//! assert_eq!(buffer.pop_front(), Some(0));
//! ```
//!
//! # Iterator
//! ```
//! use circular_buffer::CircularBuffer;
//!
//! let mut buffer = CircularBuffer::new();
//!
//! buffer.extend(0..5);
//!
//! let iters: Vec<_> = buffer.into_iter().collect();
//! assert_eq!(iters, vec![0, 1, 2, 3, 4]);
//! ```
//!
//! # From Iterator
//! ```
//! use circular_buffer::CircularBuffer;
//!
//! let buffer: CircularBuffer<_> = vec![0, 1, 2, 3, 4].into_iter().collect();
//! let buffer2: CircularBuffer<_> = (0..5).collect();
//!
//! assert_eq!(buffer, buffer2);
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::MaybeUninit;
use core::ops::{Index, IndexMut};
use core::ptr;
use core::slice;

#[cfg(feature = "serde")]
mod serde_impls;

/// Storage length of a freshly constructed buffer.
const INITIAL_CAPACITY: usize = 16;

/// A double-ended queue backed by a growable circular buffer.
///
/// The "default" usage of this type as a queue is to use `push_back` to add
/// to the queue, and `pop_front` to remove from the queue. `extend` pushes
/// onto the back in this manner, and iterating over `CircularBuffer` goes
/// front to back.
///
/// # Capacity
///
/// The storage length is always a power of two, so `capacity()` only takes
/// power-of-two values. Pushing into a full buffer doubles the storage;
/// elements already stored keep their front-to-back order across growth.
/// [Read more]
///
/// [Read more]: https://en.wikipedia.org/wiki/Circular_buffer
pub struct CircularBuffer<T> {
    buf: Box<[MaybeUninit<T>]>,
    head: usize,
    len: usize,
    mask: usize,
}

impl<T: Clone> Clone for CircularBuffer<T> {
    /// Returns a buffer with an independent copy of the storage. The clone
    /// keeps the same internal layout, so element slots line up with the
    /// original's at the moment of cloning.
    fn clone(&self) -> Self {
        let mut buf = Box::new_uninit_slice(self.buf.len());
        for i in 0..self.len {
            let idx = (self.head + i) & self.mask;
            let value = unsafe { self.buf.get_unchecked(idx).assume_init_ref() }.clone();
            buf[idx].write(value);
        }
        CircularBuffer {
            buf,
            head: self.head,
            len: self.len,
            mask: self.mask,
        }
    }
}

impl<T> Drop for CircularBuffer<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for CircularBuffer<T> {
    #[inline]
    fn default() -> Self {
        CircularBuffer::new()
    }
}

impl<T> CircularBuffer<T> {
    #[inline]
    fn allocate(capacity: usize) -> Box<[MaybeUninit<T>]> {
        debug_assert!(capacity.is_power_of_two());
        Box::new_uninit_slice(capacity)
    }

    /// Storage slot of the logical position `index`.
    #[inline]
    fn wrap_index(&self, index: usize) -> usize {
        (self.head + index) & self.mask
    }

    #[inline]
    fn is_contiguous(&self) -> bool {
        self.head + self.len <= self.buf.len()
    }

    /// Moves the element out of the slot, leaving it uninitialized.
    #[inline]
    unsafe fn buffer_read(&mut self, index: usize) -> T {
        ptr::read(self.buf.get_unchecked(index).as_ptr())
    }

    #[inline]
    unsafe fn buffer_write(&mut self, index: usize, element: T) {
        self.buf.get_unchecked_mut(index).write(element);
    }

    #[inline]
    unsafe fn buffer_ref(&self, index: usize) -> &T {
        self.buf.get_unchecked(index).assume_init_ref()
    }

    #[inline]
    unsafe fn buffer_mut(&mut self, index: usize) -> &mut T {
        self.buf.get_unchecked_mut(index).assume_init_mut()
    }

    /// Grows the storage if it cannot hold `capacity` elements.
    #[inline]
    fn ensure_capacity(&mut self, capacity: usize) {
        if capacity > self.buf.len() {
            self.grow(capacity);
        }
    }

    /// Replaces the storage with the smallest power-of-two length that holds
    /// `required_capacity` elements, obtained by repeated doubling.
    ///
    /// If the live range is a single contiguous run, every element keeps its
    /// slot offset and `head` is unchanged. If the range wraps, the run at
    /// the end of the old storage shifts right by the amount grown and `head`
    /// moves with it, while the wrapped-around run keeps its low slots; only
    /// the end-of-storage segment is ever relocated, never the whole buffer.
    #[cold]
    fn grow(&mut self, required_capacity: usize) {
        let old_capacity = self.buf.len();
        debug_assert!(required_capacity > old_capacity);

        let mut new_capacity = old_capacity;
        while new_capacity < required_capacity {
            new_capacity = new_capacity.checked_mul(2).expect("capacity overflow");
        }

        let mut buf = Self::allocate(new_capacity);
        let src = self.buf.as_ptr();
        let dst = buf.as_mut_ptr();
        unsafe {
            if self.is_contiguous() {
                //        H . . .
                // 1 [_ _ A B C D _ _]
                // 2 [_ _ A B C D _ _ _ _ _ _ _ _ _ _]
                //        H . . .
                ptr::copy_nonoverlapping(src.add(self.head), dst.add(self.head), self.len);
            } else {
                //    . .         H .
                // 1 [C D _ _ _ _ A B]
                // 2 [C D _ _ _ _ _ _ _ _ _ _ _ _ A B]
                //    . .                         H .
                let offset = new_capacity - old_capacity;
                let tail_len = old_capacity - self.head;
                ptr::copy_nonoverlapping(src, dst, self.len - tail_len);
                ptr::copy_nonoverlapping(src.add(self.head), dst.add(self.head + offset), tail_len);
                self.head += offset;
            }
        }
        // The old storage is freed without running destructors; every live
        // element was moved into the new storage above.
        self.buf = buf;
        self.mask = new_capacity - 1;
    }
}

impl<T> CircularBuffer<T> {
    /// Creates an empty `CircularBuffer` with the default starting capacity
    /// of 16 slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let buffer: CircularBuffer<usize> = CircularBuffer::new();
    /// assert_eq!(buffer.capacity(), 16);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty `CircularBuffer` that can hold at least `capacity`
    /// elements before growing.
    ///
    /// The storage length is rounded up to the next power of two, and is at
    /// least 1.
    ///
    /// # Panics
    ///
    /// Panics if the rounded-up capacity does not fit in a `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let buffer: CircularBuffer<usize> = CircularBuffer::with_capacity(10);
    /// assert_eq!(buffer.capacity(), 16);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity
            .max(1)
            .checked_next_power_of_two()
            .expect("capacity overflow");
        CircularBuffer {
            buf: Self::allocate(capacity),
            head: 0,
            len: 0,
            mask: capacity - 1,
        }
    }

    /// Returns the number of elements the buffer can hold before growing.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let buffer: CircularBuffer<usize> = CircularBuffer::with_capacity(4);
    /// assert_eq!(buffer.capacity(), 4);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of elements in the `CircularBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// assert_eq!(buffer.len(), 0);
    /// buffer.push_back(1);
    /// assert_eq!(buffer.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// assert!(buffer.is_empty());
    /// buffer.push_front(1);
    /// assert!(!buffer.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if every storage slot holds an element. The next push
    /// will double the storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::with_capacity(2);
    /// buffer.push_back(1);
    /// buffer.push_back(2);
    /// assert!(buffer.is_full());
    ///
    /// buffer.push_back(3);
    /// assert!(!buffer.is_full());
    /// assert_eq!(buffer.capacity(), 4);
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// Reserves capacity for at least `additional` more elements to be
    /// inserted without growing.
    ///
    /// # Panics
    ///
    /// Panics if the required capacity does not fit in a `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer: CircularBuffer<usize> = CircularBuffer::new();
    /// buffer.reserve(100);
    /// assert_eq!(buffer.capacity(), 128);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len.checked_add(additional).expect("capacity overflow");
        self.ensure_capacity(required);
    }

    /// Inserts a new element at the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// buffer.push_back(1);
    /// buffer.push_front(2);
    /// assert_eq!(buffer.front(), Some(&2));
    /// ```
    pub fn push_front(&mut self, element: T) {
        self.ensure_capacity(self.len + 1);
        let new_head = self.head.wrapping_sub(1) & self.mask;
        unsafe { self.buffer_write(new_head, element) };
        self.head = new_head;
        self.len += 1;
    }

    /// Inserts a new element at the back. Equivalent to
    /// [`enqueue`](CircularBuffer::enqueue).
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// buffer.push_back(1);
    /// buffer.push_back(2);
    /// assert_eq!(buffer.back(), Some(&2));
    /// ```
    pub fn push_back(&mut self, element: T) {
        self.ensure_capacity(self.len + 1);
        let new_tail = self.wrap_index(self.len);
        unsafe { self.buffer_write(new_tail, element) };
        self.len += 1;
    }

    /// Removes and returns the element at the front. Equivalent to
    /// [`dequeue`](CircularBuffer::dequeue).
    ///
    /// Returns the element, or `None` if the buffer is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// buffer.push_back(1);
    /// buffer.push_back(2);
    ///
    /// assert_eq!(buffer.pop_front(), Some(1));
    /// assert_eq!(buffer.pop_front(), Some(2));
    /// assert_eq!(buffer.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let element = unsafe { self.buffer_read(self.head) };
        self.head = (self.head + 1) & self.mask;
        self.len -= 1;
        Some(element)
    }

    /// Removes and returns the element at the back.
    ///
    /// Returns the element, or `None` if the buffer is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// assert_eq!(buffer.pop_back(), None);
    /// buffer.push_back(1);
    /// buffer.push_back(3);
    /// assert_eq!(buffer.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let tail = self.wrap_index(self.len - 1);
        let element = unsafe { self.buffer_read(tail) };
        self.len -= 1;
        Some(element)
    }

    /// Inserts a new element at the back. Equivalent to
    /// [`push_back`](CircularBuffer::push_back).
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut queue = CircularBuffer::new();
    /// queue.enqueue(1);
    /// queue.enqueue(2);
    /// assert_eq!(queue.dequeue(), Some(1));
    /// ```
    #[inline]
    pub fn enqueue(&mut self, element: T) {
        self.push_back(element);
    }

    /// Removes and returns the element at the front. Equivalent to
    /// [`pop_front`](CircularBuffer::pop_front).
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut queue = CircularBuffer::new();
    /// queue.enqueue(1);
    /// assert_eq!(queue.dequeue(), Some(1));
    /// assert_eq!(queue.dequeue(), None);
    /// ```
    #[inline]
    pub fn dequeue(&mut self) -> Option<T> {
        self.pop_front()
    }

    /// Provides a reference to the front element, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// assert_eq!(buffer.front(), None);
    /// buffer.push_back(1);
    /// buffer.push_back(2);
    /// assert_eq!(buffer.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        unsafe { Some(self.buffer_ref(self.head)) }
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// buffer is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// buffer.push_back(1);
    /// if let Some(front) = buffer.front_mut() {
    ///     *front = 9;
    /// }
    /// assert_eq!(buffer.front(), Some(&9));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            return None;
        }
        let head = self.head;
        unsafe { Some(self.buffer_mut(head)) }
    }

    /// Provides a reference to the back element, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// assert_eq!(buffer.back(), None);
    /// buffer.push_back(1);
    /// buffer.push_back(2);
    /// assert_eq!(buffer.back(), Some(&2));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        unsafe { Some(self.buffer_ref(self.wrap_index(self.len - 1))) }
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// buffer is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// buffer.push_back(1);
    /// buffer.push_back(2);
    /// if let Some(back) = buffer.back_mut() {
    ///     *back = 9;
    /// }
    /// assert_eq!(buffer.back(), Some(&9));
    /// ```
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.len == 0 {
            return None;
        }
        let tail = self.wrap_index(self.len - 1);
        unsafe { Some(self.buffer_mut(tail)) }
    }

    /// Retrieves an element in the `CircularBuffer` by index.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// buffer.push_back(3);
    /// buffer.push_back(4);
    /// buffer.push_back(5);
    /// assert_eq!(buffer.get(1), Some(&4));
    /// assert_eq!(buffer.get(3), None);
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            unsafe { Some(self.buffer_ref(self.wrap_index(index))) }
        } else {
            None
        }
    }

    /// Retrieves an element in the `CircularBuffer` mutably by index.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// buffer.push_back(3);
    /// buffer.push_back(4);
    /// buffer.push_back(5);
    /// if let Some(elem) = buffer.get_mut(1) {
    ///     *elem = 7;
    /// }
    ///
    /// assert_eq!(buffer[1], 7);
    /// ```
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            let idx = self.wrap_index(index);
            unsafe { Some(self.buffer_mut(idx)) }
        } else {
            None
        }
    }

    /// Retrieves an element by signed index, where 0 is the front and higher
    /// indices move toward the back.
    ///
    /// For negative indices, -1 is the back and lower indices move toward
    /// the front, mirroring from-end indexing in array APIs.
    ///
    /// Returns `None` if the index is out of range. Never mutates the buffer
    /// and runs in `O(1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// buffer.push_back(1);
    /// buffer.push_back(2);
    /// buffer.push_back(3);
    ///
    /// assert_eq!(buffer.at(0), Some(&1));
    /// assert_eq!(buffer.at(-1), Some(&3));
    /// assert_eq!(buffer.at(-3), Some(&1));
    /// assert_eq!(buffer.at(3), None);
    /// assert_eq!(buffer.at(-4), None);
    /// ```
    pub fn at(&self, index: isize) -> Option<&T> {
        let index = if index >= 0 {
            index as usize
        } else {
            let back = index.unsigned_abs();
            if back > self.len {
                return None;
            }
            self.len - back
        };
        self.get(index)
    }

    /// Returns `true` if the `CircularBuffer` contains an element equal to
    /// the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    ///
    /// buffer.push_back(0);
    /// buffer.push_back(1);
    ///
    /// assert_eq!(buffer.contains(&1), true);
    /// assert_eq!(buffer.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        let (a, b) = self.as_slices();
        a.contains(x) || b.contains(x)
    }

    /// Clears the buffer, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// buffer.push_back(1);
    /// buffer.clear();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
        self.head = 0;
    }

    /// Returns a pair of slices which contain, in order, the contents of the
    /// `CircularBuffer`.
    ///
    /// The second slice is empty whenever the elements are contiguous in
    /// storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    ///
    /// buffer.push_back(0);
    /// buffer.push_back(1);
    /// buffer.push_back(2);
    ///
    /// assert_eq!(buffer.as_slices(), (&[0, 1, 2][..], &[][..]));
    ///
    /// buffer.push_front(10);
    /// buffer.push_front(9);
    ///
    /// assert_eq!(buffer.as_slices(), (&[9, 10][..], &[0, 1, 2][..]));
    /// ```
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let ptr = self.buf.as_ptr() as *const T;
        unsafe {
            if self.is_contiguous() {
                (slice::from_raw_parts(ptr.add(self.head), self.len), &[])
            } else {
                let tail_len = self.buf.len() - self.head;
                (
                    slice::from_raw_parts(ptr.add(self.head), tail_len),
                    slice::from_raw_parts(ptr, self.len - tail_len),
                )
            }
        }
    }

    /// Returns a pair of mutable slices which contain, in order, the
    /// contents of the `CircularBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    ///
    /// buffer.push_back(0);
    /// buffer.push_back(1);
    /// buffer.push_front(10);
    ///
    /// buffer.as_mut_slices().0[0] = 42;
    /// assert_eq!(buffer.front(), Some(&42));
    /// ```
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let ptr = self.buf.as_mut_ptr() as *mut T;
        unsafe {
            if self.is_contiguous() {
                (
                    slice::from_raw_parts_mut(ptr.add(self.head), self.len),
                    &mut [],
                )
            } else {
                let tail_len = self.buf.len() - self.head;
                (
                    slice::from_raw_parts_mut(ptr.add(self.head), tail_len),
                    slice::from_raw_parts_mut(ptr, self.len - tail_len),
                )
            }
        }
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// buffer.push_back(5);
    /// buffer.push_back(3);
    /// buffer.push_back(4);
    /// let b: &[_] = &[&5, &3, &4];
    /// let c: Vec<&i32> = buffer.iter().collect();
    /// assert_eq!(&c[..], b);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<T> {
        Iter {
            ring: &self.buf,
            head: self.head,
            len: self.len,
        }
    }

    /// Returns a front-to-back iterator that returns mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// buffer.push_back(5);
    /// buffer.push_back(3);
    /// buffer.push_back(4);
    /// for num in buffer.iter_mut() {
    ///     *num = *num - 2;
    /// }
    /// assert_eq!(buffer.to_vec(), vec![3, 1, 2]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<T> {
        IterMut {
            head: self.head,
            len: self.len,
            ring: &mut self.buf,
        }
    }

    /// Returns a `Vec` containing the elements in this `CircularBuffer`,
    /// from the front to the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_buffer::CircularBuffer;
    ///
    /// let mut buffer = CircularBuffer::new();
    /// buffer.push_back(1);
    /// buffer.push_front(0);
    /// assert_eq!(buffer.to_vec(), vec![0, 1]);
    /// ```
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for CircularBuffer<T> {
    /// Compares logical contents only; two buffers with the same elements
    /// compare equal regardless of where the elements sit in storage.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularBuffer<T> {}

impl<T: PartialEq> PartialEq<Vec<T>> for CircularBuffer<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.len == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: PartialOrd> PartialOrd for CircularBuffer<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for CircularBuffer<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for CircularBuffer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        let (a, b) = self.as_slices();
        Hash::hash_slice(a, state);
        Hash::hash_slice(b, state);
    }
}

impl<T> Index<usize> for CircularBuffer<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        let len = self.len;
        self.get(index).unwrap_or_else(|| {
            panic!(
                "index out of bounds: the len is {} but the index is {}",
                len, index
            )
        })
    }
}

impl<T> IndexMut<usize> for CircularBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        self.get_mut(index).unwrap_or_else(|| {
            panic!(
                "index out of bounds: the len is {} but the index is {}",
                len, index
            )
        })
    }
}

impl<T> FromIterator<T> for CircularBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buffer = CircularBuffer::new();
        buffer.extend(iter);
        buffer
    }
}

impl<T> Extend<T> for CircularBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for element in iter {
            self.push_back(element);
        }
    }
}

impl<T> IntoIterator for CircularBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { inner: self }
    }
}

impl<'a, T> IntoIterator for &'a CircularBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut CircularBuffer<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// `CircularBuffer` iterator.
///
/// A cursor over the buffer holding the logical position reached so far.
/// The borrow it keeps on the buffer rules out mutation while it is alive.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Iter<'a, T> {
    ring: &'a [MaybeUninit<T>],
    head: usize,
    len: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let idx = self.head;
        self.head = (self.head + 1) & (self.ring.len() - 1);
        self.len -= 1;
        unsafe { Some(self.ring.get_unchecked(idx).assume_init_ref()) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let idx = (self.head + self.len) & (self.ring.len() - 1);
        unsafe { Some(self.ring.get_unchecked(idx).assume_init_ref()) }
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// `CircularBuffer` mutable iterator.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IterMut<'a, T> {
    ring: &'a mut [MaybeUninit<T>],
    head: usize,
    len: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        let idx = self.head;
        self.head = (self.head + 1) & (self.ring.len() - 1);
        self.len -= 1;

        unsafe {
            let slot = self.ring.get_unchecked_mut(idx);
            Some(&mut *slot.as_mut_ptr())
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let idx = (self.head + self.len) & (self.ring.len() - 1);

        unsafe {
            let slot = self.ring.get_unchecked_mut(idx);
            Some(&mut *slot.as_mut_ptr())
        }
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

/// By-value `CircularBuffer` iterator.
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IntoIter<T> {
    inner: CircularBuffer<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a buffer with an exact storage layout: `layout[i]` is the
    /// element stored in slot `i`, or `None` for an uninitialized slot.
    fn make(head: usize, layout: &[Option<i32>]) -> CircularBuffer<i32> {
        assert!(layout.len().is_power_of_two());
        let mut buf = Box::new_uninit_slice(layout.len());
        let mut len = 0;
        for (i, slot) in layout.iter().enumerate() {
            if let Some(value) = *slot {
                buf[i].write(value);
                len += 1;
            }
        }
        CircularBuffer {
            buf,
            head,
            len,
            mask: layout.len() - 1,
        }
    }

    /// Snapshot of the storage layout, `None` for slots outside the live
    /// range.
    fn slots(buffer: &CircularBuffer<i32>) -> Vec<Option<i32>> {
        let mut out = vec![None; buffer.buf.len()];
        for i in 0..buffer.len {
            let idx = (buffer.head + i) & buffer.mask;
            out[idx] = Some(unsafe { *buffer.buf[idx].as_ptr() });
        }
        out
    }

    #[test]
    fn ensure_capacity_noop_within_storage() {
        let mut buffer = make(1, &[None, Some(10), Some(20), Some(30)]);
        buffer.ensure_capacity(3);
        buffer.ensure_capacity(4);
        assert_eq!(buffer.capacity(), 4);
        assert_eq!(buffer.head, 1);
    }

    #[test]
    fn grow_keeps_offsets_when_not_wrapped() {
        let mut buffer = make(1, &[None, Some(10), Some(20), Some(30)]);

        buffer.ensure_capacity(5);

        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.mask, 7);
        assert_eq!(buffer.head, 1);
        assert_eq!(
            slots(&buffer),
            vec![None, Some(10), Some(20), Some(30), None, None, None, None]
        );
    }

    #[test]
    fn grow_shifts_tail_segment_when_wrapped() {
        // logical order 10, 30, 40 with the run split across the seam
        let mut buffer = make(3, &[Some(30), Some(40), None, Some(10)]);

        buffer.ensure_capacity(5);

        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.head, 7);
        assert_eq!(
            slots(&buffer),
            vec![Some(30), Some(40), None, None, None, None, None, Some(10)]
        );
        assert_eq!(buffer.to_vec(), vec![10, 30, 40]);
    }

    #[test]
    fn grow_full_not_wrapped() {
        let mut buffer = make(0, &[Some(10), Some(20), Some(30), Some(40)]);

        buffer.ensure_capacity(5);

        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.head, 0);
        assert_eq!(
            slots(&buffer),
            vec![Some(10), Some(20), Some(30), Some(40), None, None, None, None]
        );
    }

    #[test]
    fn grow_full_wrapped() {
        // capacity 4, head 2: logical order 10, 20, 30, 40
        let mut buffer = make(2, &[Some(30), Some(40), Some(10), Some(20)]);

        buffer.ensure_capacity(5);

        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.head, 6);
        assert_eq!(
            slots(&buffer),
            vec![Some(30), Some(40), None, None, None, None, Some(10), Some(20)]
        );
        assert_eq!(buffer.to_vec(), vec![10, 20, 30, 40]);
        assert_eq!(buffer.at(0), Some(&10));
        assert_eq!(buffer.at(-1), Some(&40));
    }

    #[test]
    fn grow_doubles_repeatedly() {
        let mut buffer = make(0, &[Some(1), Some(2)]);
        buffer.ensure_capacity(9);
        assert_eq!(buffer.capacity(), 16);
        assert_eq!(buffer.mask, 15);
        assert_eq!(buffer.to_vec(), vec![1, 2]);
    }

    #[test]
    fn push_front_wraps_to_end_of_storage() {
        let mut buffer = make(0, &[Some(20), Some(30), None, None]);

        buffer.push_front(10);

        assert_eq!(buffer.head, 3);
        assert_eq!(slots(&buffer), vec![Some(20), Some(30), None, Some(10)]);
    }

    #[test]
    fn push_front_into_gap() {
        let mut buffer = make(2, &[None, None, Some(20), Some(30)]);

        buffer.push_front(10);

        assert_eq!(buffer.head, 1);
        assert_eq!(slots(&buffer), vec![None, Some(10), Some(20), Some(30)]);
    }

    #[test]
    fn push_front_grows_when_full() {
        let mut buffer = make(2, &[Some(40), Some(50), Some(20), Some(30)]);

        buffer.push_front(10);

        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.head, 5);
        assert_eq!(
            slots(&buffer),
            vec![Some(40), Some(50), None, None, None, Some(10), Some(20), Some(30)]
        );
        assert_eq!(buffer.to_vec(), vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn push_back_wraps_past_seam() {
        let mut buffer = make(3, &[Some(20), None, None, Some(10)]);

        buffer.push_back(30);

        assert_eq!(buffer.head, 3);
        assert_eq!(slots(&buffer), vec![Some(20), Some(30), None, Some(10)]);
    }

    #[test]
    fn push_back_grows_when_full() {
        let mut buffer = make(1, &[Some(20), Some(10)]);

        buffer.push_back(30);

        assert_eq!(buffer.capacity(), 4);
        assert_eq!(buffer.head, 3);
        assert_eq!(slots(&buffer), vec![Some(20), Some(30), None, Some(10)]);
        assert_eq!(buffer.to_vec(), vec![10, 20, 30]);
    }

    #[test]
    fn pop_front_advances_head_across_seam() {
        let mut buffer = make(3, &[Some(20), Some(30), None, Some(10)]);

        assert_eq!(buffer.pop_front(), Some(10));
        assert_eq!(buffer.head, 0);
        assert_eq!(buffer.pop_front(), Some(20));
        assert_eq!(buffer.head, 1);
        assert_eq!(slots(&buffer), vec![None, Some(30), None, None]);
    }

    #[test]
    fn pop_back_leaves_head_alone() {
        let mut buffer = make(2, &[Some(30), None, Some(10), Some(20)]);

        assert_eq!(buffer.pop_back(), Some(30));
        assert_eq!(buffer.head, 2);
        assert_eq!(slots(&buffer), vec![None, None, Some(10), Some(20)]);
    }

    #[test]
    fn storage_invariants_hold_across_operations() {
        let mut buffer: CircularBuffer<usize> = CircularBuffer::with_capacity(1);
        for step in 0..200 {
            match step % 5 {
                0 | 1 => buffer.push_back(step),
                2 => buffer.push_front(step),
                3 => {
                    buffer.pop_front();
                }
                _ => {
                    buffer.pop_back();
                }
            }
            assert!(buffer.buf.len().is_power_of_two());
            assert_eq!(buffer.mask, buffer.buf.len() - 1);
            assert!(buffer.len <= buffer.buf.len());
            assert!(buffer.head < buffer.buf.len());
        }
    }

    #[test]
    fn clone_copies_layout() {
        let buffer = make(3, &[Some(20), Some(30), None, Some(10)]);
        let clone = buffer.clone();

        assert_eq!(clone.head, buffer.head);
        assert_eq!(clone.len, buffer.len);
        assert_eq!(clone.mask, buffer.mask);
        assert_eq!(slots(&clone), slots(&buffer));
    }

    #[test]
    fn clear_resets_head() {
        let mut buffer = make(3, &[Some(20), None, None, Some(10)]);
        buffer.clear();
        assert_eq!(buffer.len, 0);
        assert_eq!(buffer.head, 0);
        assert_eq!(buffer.capacity(), 4);
    }

    #[test]
    fn with_capacity_rounds_up_to_power_of_two() {
        assert_eq!(CircularBuffer::<u8>::with_capacity(0).capacity(), 1);
        assert_eq!(CircularBuffer::<u8>::with_capacity(1).capacity(), 1);
        assert_eq!(CircularBuffer::<u8>::with_capacity(3).capacity(), 4);
        assert_eq!(CircularBuffer::<u8>::with_capacity(64).capacity(), 64);
        assert_eq!(CircularBuffer::<u8>::with_capacity(65).capacity(), 128);
    }
}
