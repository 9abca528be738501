mod ids;
mod playlist;
mod video;

pub use ids::{PlaylistId, VideoId};
pub use playlist::{Playlist, PlaylistVideo, RemovedVideo};
pub use video::{SearchResults, VideoDetails, VideoSummary};
