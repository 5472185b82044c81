//! Index-Linked List Module
//!
//! A doubly-linked list whose nodes live in an index-stable arena and are
//! linked by integer handles instead of pointers. One instance tracks
//! recency order (front = most recently used), another tracks
//! insertion/update order for expiration scans.
//!
//! All positional operations are O(1): push to either end, remove by
//! handle, move a node to the front or back.

// == Node Id ==
/// Stable handle to a node in an [`IndexList`].
///
/// A handle stays valid until the node it names is removed; the slot may
/// then be reused by a later insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

// == Index List ==
/// Doubly-linked list over an arena of slots.
#[derive(Debug)]
pub struct IndexList<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<T> IndexList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the value at the front, if any.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.node(id)).map(|n| &n.value)
    }

    /// Returns the value at the back, if any.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.node(id)).map(|n| &n.value)
    }

    /// Returns the value stored under `id`, if the node is live.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|n| &n.value)
    }

    // == Push Front ==
    /// Inserts a value at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> NodeId {
        let id = self.alloc(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old) => {
                if let Some(n) = self.node_mut(old) {
                    n.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        id
    }

    // == Push Back ==
    /// Inserts a value at the back and returns its handle.
    pub fn push_back(&mut self, value: T) -> NodeId {
        let id = self.alloc(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(old) => {
                if let Some(n) = self.node_mut(old) {
                    n.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    // == Remove ==
    /// Unlinks the node `id` and returns its value, freeing the slot.
    ///
    /// Returns `None` if the handle is stale.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        self.detach(id)?;
        let node = self.nodes.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(node.value)
    }

    // == Move To Front ==
    /// Moves an existing node to the front; returns false if the handle is stale.
    pub fn move_to_front(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        let old_head = self.head;
        if let Some(n) = self.node_mut(id) {
            n.prev = None;
            n.next = old_head;
        }
        match old_head {
            Some(old) => {
                if let Some(n) = self.node_mut(old) {
                    n.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        true
    }

    // == Move To Back ==
    /// Moves an existing node to the back; returns false if the handle is stale.
    pub fn move_to_back(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        if self.tail == Some(id) {
            return true;
        }
        self.detach(id);
        let old_tail = self.tail;
        if let Some(n) = self.node_mut(id) {
            n.next = None;
            n.prev = old_tail;
        }
        match old_tail {
            Some(old) => {
                if let Some(n) = self.node_mut(old) {
                    n.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        true
    }

    /// Iterates values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    // == Internals ==
    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0).and_then(|slot| slot.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        self.len += 1;
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                NodeId(idx)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Unlinks `id` from its neighbors without freeing the slot.
    fn detach(&mut self, id: NodeId) -> Option<()> {
        let (prev, next) = {
            let n = self.node(id)?;
            (n.prev, n.next)
        };
        match prev {
            Some(p) => {
                if let Some(n) = self.node_mut(p) {
                    n.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(x) => {
                if let Some(n) = self.node_mut(x) {
                    n.prev = prev;
                }
            }
            None => self.tail = prev,
        }
        if let Some(n) = self.node_mut(id) {
            n.prev = None;
            n.next = None;
        }
        Some(())
    }
}

impl<T> Default for IndexList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over an [`IndexList`].
pub struct Iter<'a, T> {
    list: &'a IndexList<T>,
    current: Option<NodeId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.node(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}
