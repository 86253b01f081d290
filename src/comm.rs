use crossbeam::channel::{self, Receiver, Sender};
use std::process;
use std::sync::{Arc, Barrier};

/// One tagged message unit: a contiguous batch of a partition.
///
/// The tag identifies the batch's slice `[tag * B, (tag + 1) * B)` within the
/// step that sent it; between one pair of ranks within one step, tags are
/// unique.
#[derive(Debug)]
pub struct Batch<T> {
    pub tag: usize,
    pub payload: Vec<T>,
}

/// A fixed group of symmetric peer ranks wired into a full point-to-point
/// mesh.
///
/// Each directed rank pair gets its own channel, so messages between any two
/// ranks are delivered in send order and traffic on other edges can never
/// interleave with them. Constructed once per run, then split into per-rank
/// endpoints that move onto the worker threads.
pub struct ProcessGroup<T> {
    endpoints: Vec<Endpoint<T>>,
}

/// One rank's view of its process group.
pub struct Endpoint<T> {
    rank: usize,
    // outboxes[dst] carries this rank's messages to dst
    outboxes: Vec<Sender<Batch<T>>>,
    // inboxes[src] yields messages from src, in send order
    inboxes: Vec<Receiver<Batch<T>>>,
    barrier: Arc<Barrier>,
}

impl<T> ProcessGroup<T> {
    /// Wire up a group of `size` ranks. `size` must be a positive power of
    /// two; every hypercube routine relies on it.
    pub fn new(size: usize) -> Self {
        assert!(
            size > 0 && size.is_power_of_two(),
            "process group size must be a positive power of two, got {}",
            size
        );

        let barrier = Arc::new(Barrier::new(size));

        let mut outbox_rows: Vec<Vec<Sender<Batch<T>>>> = Vec::with_capacity(size);
        let mut inbox_cols: Vec<Vec<Receiver<Batch<T>>>> =
            (0..size).map(|_| Vec::with_capacity(size)).collect();

        for _src in 0..size {
            let mut row = Vec::with_capacity(size);
            for dst in 0..size {
                let (tx, rx) = channel::unbounded();
                row.push(tx);
                inbox_cols[dst].push(rx);
            }
            outbox_rows.push(row);
        }

        let endpoints = outbox_rows
            .into_iter()
            .zip(inbox_cols)
            .enumerate()
            .map(|(rank, (outboxes, inboxes))| Endpoint {
                rank,
                outboxes,
                inboxes,
                barrier: Arc::clone(&barrier),
            })
            .collect();

        ProcessGroup { endpoints }
    }

    pub fn size(&self) -> usize {
        self.endpoints.len()
    }

    /// Consume the group, yielding one endpoint per rank in rank order.
    pub fn into_endpoints(self) -> Vec<Endpoint<T>> {
        self.endpoints
    }
}

impl<T> Endpoint<T> {
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn size(&self) -> usize {
        self.outboxes.len()
    }

    /// Post a batch to `dst`. Buffered and non-blocking; the caller bounds
    /// the number outstanding per step.
    pub fn send(&self, dst: usize, tag: usize, payload: Vec<T>) {
        if self.outboxes[dst].send(Batch { tag, payload }).is_err() {
            self.transport_failure(dst);
        }
    }

    /// Block until the next batch from `src` arrives. Batches from one peer
    /// come out in send order; there is no ordering across peers.
    pub fn recv(&self, src: usize) -> Batch<T> {
        match self.inboxes[src].recv() {
            Ok(batch) => batch,
            Err(_) => self.transport_failure(src),
        }
    }

    /// Block until every rank in the group arrives. Reusable.
    pub fn barrier(&self) {
        self.barrier.wait();
    }

    // A torn-down peer can never rejoin the exchange, and the remaining
    // ranks would block on it forever. The whole group goes down.
    fn transport_failure(&self, peer: usize) -> ! {
        eprintln!(
            "rank {}: lost connection to rank {}, aborting group",
            self.rank, peer
        );
        process::exit(1);
    }
}
