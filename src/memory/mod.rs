pub mod experience;
pub mod result;
pub mod traits;
pub mod types;

pub use experience::{experience_cards_from_profile, search_result_from_profile};
pub use result::OperationResult;
pub use traits::MemoryBackend;
pub use types::{
    AddMemory, ContentPart, ConversationMessage, DeleteMemory, ExperienceCard, GetProfile,
    IngestConversation, ListMemories, ListOptions, ListedMemory, MemoryRecord, MessageContent,
    Metadata, Pagination, ProfileOptions, ProfileView, SearchExperienceCards, SearchMemories,
    SearchOptions, SortOrder,
};
