/// Unique item identifier within a dataset (uniqueness expected, not enforced).
/// Example: `traj_0042_q3`
pub type UniqueId = String;
/// Identifier grouping items into a trajectory.
/// Example: `traj_0042`
pub type TrajectoryId = String;
/// Name of the source episode subdirectory an item came from.
/// Example: `episode_017`
pub type EpisodeDir = String;
/// Identifier for an image referenced by a question or choice.
/// Resolves on disk to `<image_id>.png` or the bare `<image_id>`.
/// Example: `frame_000123`
pub type ImageId = String;
/// Category label derived from item metadata.
/// Examples: `counting`, `spatial`, `other`
pub type Tag = String;
