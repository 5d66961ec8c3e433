/// Occupancy transition of a [`StreamOutput`](super::StreamOutput) buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferSignal {
  /// The buffer went from full to having room.
  HasRoom,
  /// The buffer became full; further offers are refused until a token leaves.
  Full,
}
