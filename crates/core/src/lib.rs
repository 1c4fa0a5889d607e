pub mod shared {
    pub mod classification;
    pub mod constants;
    pub mod landmark_frame;
    #[cfg(test)]
    pub(crate) mod test_faces;
}

pub mod features {
    pub mod domain {
        pub mod feature_extractor;
        pub mod feature_set;
    }
}

pub mod classification {
    pub mod domain {
        pub mod classifier;
        pub mod decision_table;
        pub mod emotion_classifier;
        pub mod fatigue_classifier;
        pub mod posture_classifier;
    }
}

pub mod smoothing {
    pub mod domain {
        pub mod emotion_smoother;
    }
}

pub mod output {
    pub mod domain {
        pub mod snapshot;
        pub mod snapshot_sink;
    }
    pub mod infrastructure;
}

pub mod source {
    pub mod domain {
        pub mod landmark_source;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod body_language_pipeline;
    pub mod cadence_gate;
    pub mod pipeline_config;
    pub mod pipeline_logger;
    pub mod replay_recording_use_case;
    pub mod session_summarizer;
}
