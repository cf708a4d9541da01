/// Protobuf messages for the Starknet event envelope.
///
/// Mirrors `starknet.v1.Events` as prost-build would emit it.
pub mod pb {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Event {
        /// JSON description of the event's fields
        #[prost(string, tag = "1")]
        pub json_description: ::prost::alloc::string::String,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Events {
        #[prost(message, repeated, tag = "1")]
        pub events: ::prost::alloc::vec::Vec<Event>,
    }
}

/// One entry from a decoded envelope, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEventEntry {
    pub description: String,
}

impl From<pb::Event> for RawEventEntry {
    fn from(event: pb::Event) -> Self {
        Self {
            description: event.json_description,
        }
    }
}
