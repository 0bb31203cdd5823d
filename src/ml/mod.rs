// ============================================================
// Layer 5 — ML Layer
// ============================================================
// This layer contains ALL model-related code. No other layer
// touches ort, linfa, or ndarray directly — only this one.
//
// Why isolate the ML code here?
//   - If the ONNX or linfa APIs change, we only update here
//   - Other layers are testable without any model files
//   - The learning machinery is clearly separated from data
//     loading and application logic
//
// What's in this layer:
//
//   embedder.rs  — Sentence-transformer inference (ort).
//                  Loads the ONNX session + tokenizer once,
//                  mean-pools and normalises per document.
//
//   scaler.rs    — Column-wise standardisation fit on the
//                  training partition only.
//
//   forest.rs    — Bagged decision-tree ensemble on top of
//                  linfa-trees, seeded bootstrap sampling,
//                  majority-vote prediction.
//
//   model.rs     — TriageModel: the fitted scaler + forest as
//                  one explicit artifact.
//
//   trainer.rs   — Split, scale, fit, evaluate; returns the
//                  model and the held-out F1.
//
//   predictor.rs — Applies a fitted model to new documents
//                  through the same feature pipeline.
//
// Reference: Breiman (2001) Random forests
//            Reimers & Gurevych (2019) Sentence-BERT

/// Sentence-embedding inference via ONNX Runtime
pub mod embedder;

/// Mean/variance standardisation of feature columns
pub mod scaler;

/// Bagged decision-tree ensemble
pub mod forest;

/// The fitted model artifact (scaler + forest)
pub mod model;

/// Training loop: split, scale, fit, evaluate
pub mod trainer;

/// Single-document prediction with a fitted model
pub mod predictor;
